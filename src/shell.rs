//! Interactive numbered-menu front end.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::debug;

use crate::{
    library::{Library, SearchQuery},
    report::CatalogReport,
};

/// Presentation switches for the shell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellOptions {
    /// Render listings and search hits as JSON
    pub json: bool,
}

/// What the loop does after a menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Show the menu again
    Continue,
    /// End the session
    Exit,
}

/// Menu-driven front end over a [`Library`].
///
/// Reads one choice per cycle from `input` and writes all prompts and
/// results to `output`. End of input ends the session like choosing Exit.
#[derive(Debug)]
pub struct Shell<R, W> {
    /// The library being operated on
    library: Library,
    /// Source of menu choices and field values
    input: R,
    /// Sink for prompts and results
    output: W,
    /// Presentation switches
    options: ShellOptions,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell over `library` reading `input` and writing `output`
    #[must_use]
    pub fn new(library: Library, input: R, output: W, options: ShellOptions) -> Self {
        Self { library, input, output, options }
    }

    /// Tear the shell down, handing back the library and the output sink
    #[must_use]
    pub fn into_parts(self) -> (Library, W) {
        (self.library, self.output)
    }

    /// Run the menu loop until Exit or end of input
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                writeln!(self.output, "Exiting...")?;
                return Ok(());
            };

            debug!(choice = %choice.trim(), "menu selection");
            if self.dispatch(choice.trim())? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Print the numbered menu
    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", "Library Management System".green().bold())?;
        writeln!(self.output, "1. Add Book")?;
        writeln!(self.output, "2. Remove Book")?;
        writeln!(self.output, "3. Search Book")?;
        writeln!(self.output, "4. List All Books")?;
        writeln!(self.output, "5. Add Member")?;
        writeln!(self.output, "6. Remove Member")?;
        writeln!(self.output, "7. Borrow Book")?;
        writeln!(self.output, "8. Return Book")?;
        writeln!(self.output, "9. Display Member Info")?;
        writeln!(self.output, "10. Lending History")?;
        writeln!(self.output, "0. Exit")
    }

    /// Write `message`, then read one line without its line ending.
    /// `None` means the input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Report a successful action
    fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.green())
    }

    /// Report a failed action
    fn failure(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.red())
    }

    /// Run the handler for one menu choice
    fn dispatch(&mut self, choice: &str) -> io::Result<Flow> {
        match choice {
            "1" => self.add_book(),
            "2" => self.remove_book(),
            "3" => self.search_book(),
            "4" => self.list_books(),
            "5" => self.add_member(),
            "6" => self.remove_member(),
            "7" => self.borrow_book(),
            "8" => self.return_book(),
            "9" => self.display_member_info(),
            "10" => self.lending_history(),
            "0" => {
                writeln!(self.output, "Exiting...")?;
                Ok(Flow::Exit)
            }
            _ => {
                writeln!(self.output, "{}", "Invalid choice. Please try again.".yellow())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Option 1
    fn add_book(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt("Enter book title: ")? else { return Ok(Flow::Exit) };
        let Some(author) = self.prompt("Enter book author: ")? else { return Ok(Flow::Exit) };
        let Some(genre) = self.prompt("Enter book genre: ")? else { return Ok(Flow::Exit) };
        let Some(year) = self.prompt("Enter book published year: ")? else { return Ok(Flow::Exit) };

        self.library.add_book(title.as_str(), author, genre, year);
        self.success(&format!("Book '{title}' added to the library."))?;
        Ok(Flow::Continue)
    }

    /// Option 2; both failure kinds share one message that echoes the input
    fn remove_book(&mut self) -> io::Result<Flow> {
        let Some(title) = self.prompt("Enter book title to remove: ")? else {
            return Ok(Flow::Exit);
        };

        match self.library.remove_book(&title) {
            Ok(_) => self.success(&format!("Book '{title}' removed from the library."))?,
            Err(e) => {
                debug!(error = %e, "remove failed");
                self.failure(&format!("Book '{title}' not found or is currently borrowed."))?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Option 3, with its own title/author/genre sub-menu
    fn search_book(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "Search by:")?;
        writeln!(self.output, "1. Title\n2. Author\n3. Genre")?;
        let Some(choice) = self.prompt("Enter your choice: ")? else { return Ok(Flow::Exit) };

        let (label, build): (&str, fn(String) -> SearchQuery) = match choice.trim() {
            "1" => ("Enter book title to search: ", SearchQuery::by_title),
            "2" => ("Enter author to search: ", SearchQuery::by_author),
            "3" => ("Enter genre to search: ", SearchQuery::by_genre),
            _ => return Ok(Flow::Continue),
        };
        let Some(needle) = self.prompt(label)? else { return Ok(Flow::Exit) };

        let query = build(needle);
        let results = self.library.search_book(&query);
        if self.options.json {
            let json = CatalogReport::books_json(&results)?;
            writeln!(self.output, "{json}")?;
        } else {
            let text = CatalogReport::search_results(&results);
            write!(self.output, "\n{text}")?;
        }
        Ok(Flow::Continue)
    }

    /// Option 4
    fn list_books(&mut self) -> io::Result<Flow> {
        if self.options.json {
            let json = CatalogReport::catalog_json(&self.library)?;
            writeln!(self.output, "{json}")?;
        } else {
            let text = CatalogReport::catalog(&self.library);
            write!(self.output, "\n{text}")?;
        }
        Ok(Flow::Continue)
    }

    /// Option 5
    fn add_member(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Enter member name: ")? else { return Ok(Flow::Exit) };
        let Some(member_id) = self.prompt("Enter member ID: ")? else { return Ok(Flow::Exit) };

        self.library.add_member(name.as_str(), member_id);
        self.success(&format!("Member '{name}' added to the library."))?;
        Ok(Flow::Continue)
    }

    /// Option 6
    fn remove_member(&mut self) -> io::Result<Flow> {
        let Some(member_id) = self.prompt("Enter member ID to remove: ")? else {
            return Ok(Flow::Exit);
        };

        match self.library.remove_member(&member_id) {
            Ok(member) => {
                self.success(&format!("Member '{}' removed from the library.", member.name))?;
            }
            Err(e) => self.failure(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Option 7
    fn borrow_book(&mut self) -> io::Result<Flow> {
        let Some(member_id) = self.prompt("Enter member ID: ")? else { return Ok(Flow::Exit) };
        let Some(title) = self.prompt("Enter book title to borrow: ")? else {
            return Ok(Flow::Exit);
        };

        match self.library.borrow_book(&member_id, &title) {
            Ok(record) => {
                self.success(&format!("{} borrowed '{}'", record.member_name, record.title))?;
            }
            Err(e) => self.failure(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Option 8
    fn return_book(&mut self) -> io::Result<Flow> {
        let Some(member_id) = self.prompt("Enter member ID: ")? else { return Ok(Flow::Exit) };
        let Some(title) = self.prompt("Enter book title to return: ")? else {
            return Ok(Flow::Exit);
        };

        match self.library.return_book(&member_id, &title) {
            Ok(record) => {
                self.success(&format!("{} returned '{}'", record.member_name, record.title))?;
            }
            Err(e) => self.failure(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Option 9
    fn display_member_info(&mut self) -> io::Result<Flow> {
        let Some(member_id) = self.prompt("Enter member ID: ")? else { return Ok(Flow::Exit) };

        match self.library.display_member_info(&member_id) {
            Ok(summary) => writeln!(self.output, "{summary}")?,
            Err(e) => writeln!(self.output, "{}", e.to_string().red())?,
        }
        Ok(Flow::Continue)
    }

    /// Option 10: the ledger plus catalog counts
    fn lending_history(&mut self) -> io::Result<Flow> {
        let records: Vec<_> = self.library.history().collect();
        let table = CatalogReport::history_table(&records);
        let stats = CatalogReport::stats(&self.library);
        write!(self.output, "\n{table}\n{stats}")?;
        Ok(Flow::Continue)
    }
}
