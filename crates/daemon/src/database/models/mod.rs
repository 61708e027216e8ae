mod note;

pub use note::{NewNote, Note, NoteStoreError};
