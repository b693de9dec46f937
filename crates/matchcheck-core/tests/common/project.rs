//! Throwaway project directory with a small, consistent match dataset.

use std::fs;
use std::path::{Path, PathBuf};

use matchcheck_core::config::MatchcheckConfig;
use tempfile::TempDir;

pub const HEADER: &str = "competition_code,competition_name,season,match_id,matchday,stage,status,date_utc,referee,referee_id,home_team_id,home_team,away_team_id,away_team,fulltime_home,fulltime_away,halftime_home,halftime_away,goal_difference,total_goals,match_outcome,home_points,away_points";

pub const ROWS: &[&str] = &[
    "PL,Premier League,2024,497410,1,REGULAR_SEASON,FINISHED,2024-08-16T19:00:00Z,Robert Jones,11580,66,Manchester United FC,63,Fulham FC,1,0,0,0,1,1,Home Win,3,0",
    "PL,Premier League,2024,497411,1,REGULAR_SEASON,FINISHED,2024-08-17T11:30:00Z,Tim Robinson,11605,349,Ipswich Town FC,64,Liverpool FC,0,2,0,0,-2,2,Away Win,0,3",
    "PL,Premier League,2024,497412,1,REGULAR_SEASON,FINISHED,2024-08-17T14:00:00Z,Jarred Gillett,11494,57,Arsenal FC,76,Wolverhampton Wanderers FC,2,0,1,0,2,2,Home Win,3,0",
    "PL,Premier League,2024,497413,1,REGULAR_SEASON,FINISHED,2024-08-17T14:00:00Z,Simon Hooper,11446,62,Everton FC,397,Brighton & Hove Albion FC,0,3,0,1,-3,3,Away Win,0,3",
    "PL,Premier League,2024,497414,1,REGULAR_SEASON,FINISHED,2024-08-18T13:00:00Z,Craig Pawson,11309,1044,AFC Bournemouth,67,Newcastle United FC,1,1,0,1,0,2,Draw,1,1",
];

pub struct Project {
    pub dir: TempDir,
    pub config: MatchcheckConfig,
}

impl Project {
    /// Project with the default layout and the fixture dataset written.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project = Self {
            dir,
            config: MatchcheckConfig::default(),
        };
        project.write_dataset(ROWS);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.root().join(&self.config.dataset_file)
    }

    pub fn write_dataset(&self, rows: &[&str]) {
        let path = self.dataset_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut text = format!("{HEADER}\n");
        for r in rows {
            text.push_str(r);
            text.push('\n');
        }
        fs::write(path, text).unwrap();
    }
}
