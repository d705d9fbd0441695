//! Interactive menu loop.
//!
//! The shell moves between [`ShellState`]s until the user picks Exit or
//! input runs out. Storage failures are printed and the loop carries on.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use guestbook_sanitizer::{contains_tag, sanitize};
use guestbook_shared::{GuestbookEntry, GuestbookError, Result};
use guestbook_storage::EntryStore;
use tracing::debug;

const MENU: &str = "\nGuestbook Application\n1. Add New Entry\n2. View All Entries\n3. Exit";
const DIVIDER: &str = "---------------------------------";

/// Persistence operations the shell needs.
pub(crate) trait EntryBackend {
    async fn add_entry(&self, entry: &GuestbookEntry) -> Result<i64>;
    async fn list_entries(&self) -> Result<Vec<GuestbookEntry>>;
}

impl EntryBackend for EntryStore {
    async fn add_entry(&self, entry: &GuestbookEntry) -> Result<i64> {
        EntryStore::add_entry(self, entry).await
    }

    async fn list_entries(&self) -> Result<Vec<GuestbookEntry>> {
        EntryStore::list_entries(self).await
    }
}

/// A numbered menu option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    Add,
    View,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = GuestbookError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(1) => Ok(Self::Add),
            Ok(2) => Ok(Self::View),
            Ok(3) => Ok(Self::Exit),
            _ => Err(GuestbookError::input("Invalid option, please try again.")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellState {
    MenuPrompt,
    AddEntryFlow,
    ListFlow,
    Exit,
}

impl From<MenuChoice> for ShellState {
    fn from(choice: MenuChoice) -> Self {
        match choice {
            MenuChoice::Add => Self::AddEntryFlow,
            MenuChoice::View => Self::ListFlow,
            MenuChoice::Exit => Self::Exit,
        }
    }
}

/// Menu-driven front end over an [`EntryBackend`].
pub(crate) struct Shell<'a, S, R, W> {
    store: &'a S,
    input: R,
    output: W,
}

impl<'a, S, R, W> Shell<'a, S, R, W>
where
    S: EntryBackend,
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(store: &'a S, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run until Exit is chosen or input is exhausted.
    ///
    /// Only console I/O failures are returned as errors.
    pub(crate) async fn run(&mut self) -> io::Result<()> {
        let mut state = ShellState::MenuPrompt;
        loop {
            debug!(?state, "shell state");
            state = match state {
                ShellState::MenuPrompt => self.menu_prompt()?,
                ShellState::AddEntryFlow => self.add_entry_flow().await?,
                ShellState::ListFlow => self.list_flow().await?,
                ShellState::Exit => {
                    writeln!(self.output, "Exiting...")?;
                    self.output.flush()?;
                    return Ok(());
                }
            };
        }
    }

    fn menu_prompt(&mut self) -> io::Result<ShellState> {
        writeln!(self.output, "{MENU}")?;
        let Some(line) = self.prompt("Choose an option: ")? else {
            return Ok(ShellState::Exit);
        };

        match line.parse::<MenuChoice>() {
            Ok(choice) => Ok(choice.into()),
            Err(e) => {
                debug!(input = %line, "rejected menu input");
                writeln!(self.output, "{e}")?;
                Ok(ShellState::MenuPrompt)
            }
        }
    }

    async fn add_entry_flow(&mut self) -> io::Result<ShellState> {
        let Some(name) = self.prompt_field("name", "Enter Name: ")? else {
            return Ok(ShellState::Exit);
        };
        let Some(email) = self.prompt_field("email", "Enter Email: ")? else {
            return Ok(ShellState::Exit);
        };
        let Some(website) = self.prompt_field("website", "Enter Website (optional): ")? else {
            return Ok(ShellState::Exit);
        };
        let Some(comment) = self.prompt_field("comment", "Enter Comment: ")? else {
            return Ok(ShellState::Exit);
        };

        let entry = GuestbookEntry::new(name, email, website, comment);
        match self.store.add_entry(&entry).await {
            Ok(_) => writeln!(self.output, "Entry added successfully.")?,
            Err(e) => writeln!(self.output, "Error adding entry: {e}")?,
        }
        Ok(ShellState::MenuPrompt)
    }

    async fn list_flow(&mut self) -> io::Result<ShellState> {
        match self.store.list_entries().await {
            Ok(entries) if entries.is_empty() => writeln!(self.output, "No entries found.")?,
            Ok(entries) => {
                for entry in &entries {
                    self.write_entry(entry)?;
                }
            }
            Err(e) => writeln!(self.output, "Error fetching entries: {e}")?,
        }
        Ok(ShellState::MenuPrompt)
    }

    fn write_entry(&mut self, entry: &GuestbookEntry) -> io::Result<()> {
        let id = entry.id.map(|id| id.to_string()).unwrap_or_default();
        writeln!(self.output, "\n{DIVIDER}")?;
        writeln!(self.output, "ID: {id}")?;
        writeln!(self.output, "Name: {}", entry.name)?;
        writeln!(self.output, "Email: {}", entry.email)?;
        writeln!(self.output, "Website: {}", entry.website)?;
        writeln!(self.output, "Comment: {}", entry.comment)?;
        writeln!(self.output, "{DIVIDER}\n")
    }

    /// Prompt for one field and return it sanitized.
    fn prompt_field(&mut self, field: &'static str, label: &str) -> io::Result<Option<String>> {
        Ok(self.prompt(label)?.map(|raw| {
            if contains_tag(&raw) {
                debug!(field, "markup censored");
            }
            sanitize(&raw)
        }))
    }

    /// Write `label` without a newline and read the reply. `None` at end of input.
    ///
    /// Bytes that are not UTF-8 become U+FFFD rather than an error.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
