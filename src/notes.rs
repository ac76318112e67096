use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph},
};
use rowkit::{
  Changeset, Configurable, DynRowItem, RowList, SelectionHandler,
  components::views::{HeaderRow, Note, NoteRow},
  handler_ref, row_item,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

use crate::{action::Action, component::Component, config::Config, tui::Frame};

const HEADER_IDENTITY: &str = "header";

fn header_text(count: usize) -> String {
  match count {
    1 => String::from("1 note"),
    count => format!("{count} notes"),
  }
}

/// Forwards row selections into the app's action channel.
struct ActionForwarder {
  tx: UnboundedSender<Action>,
}

impl SelectionHandler for ActionForwarder {
  fn did_select(&self, identity: &str) {
    if let Err(e) = self.tx.send(Action::RowSelected(identity.to_string())) {
      error!("Failed to send action: {}", e);
    }
  }
}

/// The demo's only screen: a header row followed by one row per note.
pub struct NotesComponent {
  header: String,
  notes: Vec<(String, Note)>,
  next_id: usize,
  list: RowList,
  handler: Option<Arc<ActionForwarder>>,
  last_changeset: Option<Changeset>,
  status: String,
}

impl NotesComponent {
  pub fn new(config: &Config) -> Self {
    let notes: Vec<(String, Note)> =
      config.notes.iter().enumerate().map(|(index, title)| (format!("note-{index}"), Note::new(title.as_str()))).collect();
    NotesComponent {
      header: header_text(notes.len()),
      next_id: notes.len(),
      notes,
      list: RowList::new(config.title.as_str()).with_highlight_symbol(config.highlight_symbol.as_str()),
      handler: None,
      last_changeset: None,
      status: String::from("nothing selected yet"),
    }
  }

  pub fn list(&self) -> &RowList {
    &self.list
  }

  /// Builds a fresh descriptor for every row and hands them all to the list.
  fn rebuild(&mut self) -> Result<()> {
    self.header = header_text(self.notes.len());
    let handler = self.handler.as_ref().map(handler_ref);
    let mut items: Vec<DynRowItem> = Vec::with_capacity(self.notes.len() + 1);
    items.push(row_item(HeaderRow::fixed(self.header.clone(), HEADER_IDENTITY)));
    for (identity, note) in &self.notes {
      items.push(row_item(NoteRow::selectable(note.clone(), handler.clone(), identity.as_str())));
    }

    let changeset = self.list.set_items(items)?;
    debug!("notes rebuilt: {}", changeset);
    self.last_changeset = Some(changeset);
    Ok(())
  }

  fn selected_note_index(&self) -> Option<usize> {
    let identity = self.list.selected_item()?.identity().to_string();
    self.notes.iter().position(|(id, _)| *id == identity)
  }

  fn toggle_published(&mut self) -> Result<()> {
    if let Some(index) = self.selected_note_index() {
      let note = &mut self.notes[index].1;
      note.status = note.status.toggled();
      self.rebuild()?;
    }
    Ok(())
  }

  fn add_note(&mut self) -> Result<()> {
    let identity = format!("note-{}", self.next_id);
    self.notes.push((identity, Note::new(format!("Note {}", self.next_id + 1))));
    self.next_id += 1;
    self.rebuild()
  }

  fn remove_selected(&mut self) -> Result<()> {
    if let Some(index) = self.selected_note_index() {
      let (identity, _) = self.notes.remove(index);
      info!("Removed {}", identity);
      self.rebuild()?;
    }
    Ok(())
  }

  fn footer_text(&self) -> String {
    let changes = self.last_changeset.as_ref().map(|changeset| changeset.to_string()).unwrap_or_default();
    let handler = if self.handler.is_some() { "attached" } else { "released" };
    format!(
      "{} | {} | handler {}\n↑/↓ move | enter select | p publish | a add | x remove | r reverse | h release handler | q quit",
      self.status, changes, handler
    )
  }
}

impl Component for NotesComponent {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    self.handler = Some(Arc::new(ActionForwarder { tx }));
    self.rebuild()
  }

  fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    let action = match key.code {
      KeyCode::Up => Some(Action::SelectPrevious),
      KeyCode::Down => Some(Action::SelectNext),
      KeyCode::Enter => Some(Action::ActivateSelected),
      KeyCode::Char('p') => Some(Action::TogglePublished),
      KeyCode::Char('a') => Some(Action::AddNote),
      KeyCode::Char('x') => Some(Action::RemoveSelected),
      KeyCode::Char('r') => Some(Action::ReverseNotes),
      KeyCode::Char('h') => Some(Action::DetachHandler),
      _ => None,
    };
    Ok(action)
  }

  fn update(&mut self, action: Action) -> Result<Option<Action>> {
    match action {
      Action::SelectNext => self.list.select_next(),
      Action::SelectPrevious => self.list.select_previous(),
      Action::ActivateSelected => {
        if !self.list.activate_selected() {
          self.status = String::from("that row cannot be selected");
        }
      },
      Action::RowSelected(identity) => {
        self.status = match self.notes.iter().find(|(id, _)| *id == identity) {
          Some((_, note)) => format!("selected '{}' ({})", note.title, note.status),
          None => format!("selected {identity}"),
        };
      },
      Action::TogglePublished => self.toggle_published()?,
      Action::AddNote => self.add_note()?,
      Action::RemoveSelected => self.remove_selected()?,
      Action::ReverseNotes => {
        self.notes.reverse();
        self.rebuild()?;
      },
      Action::DetachHandler => {
        self.handler = None;
        self.status = String::from("selection handler released");
      },
      Action::Refresh => self.rebuild()?,
      Action::Error(message) => self.status = message,
      _ => return Ok(None),
    }
    Ok(Some(Action::Render))
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    let chunks =
      Layout::default().direction(Direction::Vertical).constraints([Constraint::Min(1), Constraint::Length(4)]).split(area);

    self.list.render(f, chunks[0]);

    let footer = Paragraph::new(self.footer_text())
      .block(Block::default().borders(Borders::ALL))
      .style(Style::default().fg(Color::White));
    f.render_widget(footer, chunks[1]);
    Ok(())
  }
}
