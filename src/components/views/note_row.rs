use ratatui::{
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::ListItem,
};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::components::traits::{configurable::Configurable, row_view::RowView};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NoteStatus {
  #[default]
  Draft,
  Final,
}

impl NoteStatus {
  pub fn toggled(self) -> Self {
    match self {
      NoteStatus::Draft => NoteStatus::Final,
      NoteStatus::Final => NoteStatus::Draft,
    }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
  pub title: String,
  pub status: NoteStatus,
}

impl Note {
  pub fn new(title: impl Into<String>) -> Self {
    Note { title: title.into(), status: NoteStatus::Draft }
  }
}

#[derive(Debug, Default)]
pub struct NoteRow {
  title: String,
  status: NoteStatus,
}

impl NoteRow {
  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn status(&self) -> NoteStatus {
    self.status
  }
}

impl RowView for NoteRow {
  fn render(&self) -> ListItem<'_> {
    let title = match self.status {
      NoteStatus::Draft => Span::styled(self.title.as_str(), Style::default()),
      NoteStatus::Final => Span::styled(self.title.as_str(), Style::default().fg(Color::LightGreen)),
    };
    let status = Span::styled(format!(" ({})", self.status), Style::default().add_modifier(Modifier::DIM));
    ListItem::new(Line::from(vec![title, status]))
  }
}

impl Configurable for NoteRow {
  type Data = Note;

  fn configure(view: &mut Self, data: &Note) {
    view.title.clone_from(&data.title);
    view.status = data.status;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_toggled() {
    assert_eq!(NoteStatus::Draft.toggled(), NoteStatus::Final);
    assert_eq!(NoteStatus::Final.toggled(), NoteStatus::Draft);
  }

  #[test]
  fn test_configure_note_row() {
    let mut row = NoteRow::default();
    NoteRow::configure(&mut row, &Note { title: "groceries".to_string(), status: NoteStatus::Final });

    assert_eq!(row.title(), "groceries");
    assert_eq!(row.status(), NoteStatus::Final);
  }

  #[test]
  fn test_render_draft() {
    let mut row = NoteRow::default();
    NoteRow::configure(&mut row, &Note::new("draft"));

    assert_eq!(
      row.render(),
      ListItem::new(Line::from_iter([
        Span::from("draft"),
        Span::from(" (draft)").style(Style::default().add_modifier(Modifier::DIM)),
      ]))
    );
  }

  #[test]
  fn test_render_final() {
    let mut row = NoteRow::default();
    NoteRow::configure(&mut row, &Note { title: "final".to_string(), status: NoteStatus::Final });

    assert_eq!(
      row.render(),
      ListItem::new(Line::from_iter([
        Span::from("final").style(Style::default().fg(Color::LightGreen)),
        Span::from(" (final)").style(Style::default().add_modifier(Modifier::DIM)),
      ]))
    );
  }
}
