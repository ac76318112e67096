use ratatui::{
  style::{Modifier, Style},
  text::Span,
  widgets::ListItem,
};

use crate::components::traits::{configurable::Configurable, row_view::RowView};

/// Bold section title, meant to be used through [`Configurable::fixed`].
#[derive(Debug, Default)]
pub struct HeaderRow {
  text: String,
}

impl HeaderRow {
  pub fn text(&self) -> &str {
    &self.text
  }
}

impl RowView for HeaderRow {
  fn render(&self) -> ListItem<'_> {
    ListItem::new(Span::styled(self.text.as_str(), Style::default().add_modifier(Modifier::BOLD)))
  }
}

impl Configurable for HeaderRow {
  type Data = String;

  fn configure(view: &mut Self, data: &String) {
    view.text.clone_from(data);
  }
}
