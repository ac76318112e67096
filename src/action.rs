use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  ActivateSelected,
  AddNote,
  DetachHandler,
  Error(String),
  Quit,
  Refresh,
  RemoveSelected,
  Render,
  Resize(u16, u16),
  Resume,
  ReverseNotes,
  RowSelected(String),
  SelectNext,
  SelectPrevious,
  Suspend,
  Tick,
  TogglePublished,
}
