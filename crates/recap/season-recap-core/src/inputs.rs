//! Input contracts for the recap page.
//!
//! Adapters collect user and intersection events between frames and pass them
//! to `RecapPage::update()`, which applies them before advancing time.

use serde::{Deserialize, Serialize};

use crate::visibility::VisibilityTarget;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Commands applied in order at the start of the frame.
    #[serde(default)]
    pub commands: Vec<PageCommand>,
}

impl Inputs {
    pub fn one(cmd: PageCommand) -> Self {
        Self {
            commands: vec![cmd],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageCommand {
    /// Click on the award card at `index` in the grid.
    OpenAward { index: usize },
    /// Click on the hall-of-fame card.
    OpenAttendanceKing,
    /// Close button or backdrop click.
    Close,
    /// Intersection report for a counter or section.
    Visibility {
        target: VisibilityTarget,
        visible: bool,
    },
}
