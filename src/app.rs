use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::{action::Action, cli::Cli, component::Component, config::Config, notes::NotesComponent, tui, tui::Tui};

pub struct App {
  pub notes: Box<dyn Component>,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub tick_rate: f64,
  pub frame_rate: f64,
}

impl App {
  pub fn new(cli: &Cli, mut config: Config) -> Result<Self> {
    if let Some(title) = &cli.title {
      config.title.clone_from(title);
    }
    let notes = Box::new(NotesComponent::new(&config));
    Ok(Self { notes, should_quit: false, should_suspend: false, tick_rate: cli.tick_rate, frame_rate: cli.frame_rate })
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = tui::Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
    tui.enter()?;

    self.notes.register_action_handler(action_tx.clone())?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Quit => action_tx.send(Action::Quit)?,
          tui::Event::Tick => action_tx.send(Action::Tick)?,
          tui::Event::Render => action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            let action = match key {
              KeyEvent { code: KeyCode::Char('q'), .. } => Some(Action::Quit),
              KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Quit),
              KeyEvent { code: KeyCode::Char('z' | 'Z'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Suspend),
              _ => None,
            };
            if let Some(action) = action {
              action_tx.send(action)?;
            }
          },
          _ => {},
        }

        if let Some(action) = self.notes.handle_events(Some(e.clone()))? {
          action_tx.send(action)?;
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          debug!("{action:?}");
        }

        match action {
          Action::Quit => self.should_quit = true,
          Action::Suspend => self.should_suspend = true,
          Action::Resume => self.should_suspend = false,
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.draw(&mut tui, &action_tx)?;
          },
          Action::Render => self.draw(&mut tui, &action_tx)?,
          Action::Error(ref message) => error!("{message}"),
          _ => {},
        }
        if let Some(action) = self.notes.update(action.clone())? {
          action_tx.send(action)?
        };
      }
      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }

  fn draw(&mut self, tui: &mut Tui, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
    let mut failure = None;
    tui.draw(|f| {
      let area = f.area();
      if let Err(e) = self.notes.draw(f, area) {
        failure = Some(format!("Failed to draw: {:?}", e));
      }
    })?;
    if let Some(message) = failure {
      action_tx.send(Action::Error(message))?;
    }
    Ok(())
  }
}
