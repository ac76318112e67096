mod header_row;
mod note_row;

pub use header_row::HeaderRow;
pub use note_row::{Note, NoteRow, NoteStatus};
