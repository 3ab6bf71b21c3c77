//! Line-oriented shell over a selection session.

use artworks_lib::api::PageFetcher;
use artworks_lib::error::ValidationError;
use artworks_lib::model::Artwork;
use artworks_lib::model::ItemId;
use artworks_lib::selection::RangeCount;
use artworks_lib::selection::SelectionSession;
use thiserror::Error;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;

use crate::error::CliError;
use crate::render;

const HELP: &str = "\
Commands:
  page <n>          show page n
  next, prev        move one page forward or back
  show              redraw the current page
  toggle <id>       flip the selection of one artwork
  check <id>...     set exactly which rows of the current page are checked
  all, none         select or deselect every row of the current page
  select <count>    select <count> artworks starting at the current page
  deselect <count>  deselect <count> selected artworks
  clear             clear the whole selection
  selected          list the selection
  help              show this help
  quit              exit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Page(u32),
    Next,
    Prev,
    Show,
    Toggle(ItemId),
    Check(Vec<ItemId>),
    SelectPage,
    DeselectPage,
    Select(RangeCount),
    Deselect(RangeCount),
    Clear,
    Selected,
    Help,
    Quit,
}

/// A line that could not be turned into a [`Command`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("invalid id '{0}'")]
    InvalidId(String),

    #[error("invalid page '{0}'")]
    InvalidPage(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "page" | "p" => {
                let raw = argument(words.next(), "page", "a page number")?;
                let page = raw
                    .parse::<u32>()
                    .ok()
                    .filter(|page| *page > 0)
                    .ok_or_else(|| CommandError::InvalidPage(raw.to_string()))?;
                Self::Page(page)
            }
            "next" | "n" => Self::Next,
            "prev" => Self::Prev,
            "show" | "ls" => Self::Show,
            "toggle" | "t" => {
                let raw = argument(words.next(), "toggle", "an artwork id")?;
                Self::Toggle(parse_id(raw)?)
            }
            "check" => Self::Check(words.map(parse_id).collect::<Result<_, _>>()?),
            "all" => Self::SelectPage,
            "none" => Self::DeselectPage,
            "select" | "s" => {
                let raw = argument(words.next(), "select", "a count")?;
                Self::Select(raw.parse()?)
            }
            "deselect" | "d" => {
                let raw = argument(words.next(), "deselect", "a count")?;
                Self::Deselect(raw.parse()?)
            }
            "clear" => Self::Clear,
            "selected" => Self::Selected,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn argument<'a>(
    word: Option<&'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    word.ok_or(CommandError::MissingArgument { command, expected })
}

fn parse_id(raw: &str) -> Result<ItemId, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

/// Interactive shell driving a [`SelectionSession`].
pub struct Shell<F: PageFetcher<Item = Artwork>> {
    session: SelectionSession<F>,
}

impl<F: PageFetcher<Item = Artwork>> Shell<F> {
    /// Creates a shell around a session.
    pub fn new(session: SelectionSession<F>) -> Self {
        Self { session }
    }

    /// Reads commands from stdin until `quit` or end of input.
    pub async fn run(&self) -> Result<(), CliError> {
        let mut rx = self.session.store().subscribe();
        let watcher = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let count = *rx.borrow_and_update();
                log::info!("Selection now holds {} artwork(s)", count);
            }
        });

        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let intro = self.execute(Command::Page(1)).await;
        stdout.write_all(format!("{}\n", intro).as_bytes()).await?;

        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let output = match Command::parse(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await,
                Err(e) => e.to_string(),
            };
            stdout.write_all(format!("{}\n", output).as_bytes()).await?;
        }

        watcher.abort();
        Ok(())
    }

    /// Runs one command and returns the text to show.
    pub async fn execute(&self, command: Command) -> String {
        let session = &self.session;
        log::debug!("Executing {:?}", command);

        match command {
            Command::Page(page) => self.goto(page).await,
            Command::Next => match session.visible_page() {
                Some(page) if page.has_more(session.page_size()) => {
                    self.goto(page.index() + 1).await
                }
                Some(_) => "Already on the last page".to_string(),
                None => self.goto(1).await,
            },
            Command::Prev => match session.current_page() {
                Some(page) if page > 1 => self.goto(page - 1).await,
                _ => "Already on the first page".to_string(),
            },
            Command::Show => self.render_current(),
            Command::Toggle(id) => {
                let label = self.label(id);
                if session.store().toggle(id) {
                    format!("Selected {}", label)
                } else {
                    format!("Deselected {}", label)
                }
            }
            Command::Check(ids) => {
                let result = session.apply_page_selection(&ids);
                let mut out = format!(
                    "{} selected, {} deselected on this page",
                    result.added.len(),
                    result.removed.len()
                );
                if !result.ignored.is_empty() {
                    let ignored: Vec<String> = result.ignored.iter().map(ItemId::to_string).collect();
                    out.push_str(&format!("\nIgnored ids not on this page: {}", ignored.join(", ")));
                }
                out
            }
            Command::SelectPage => match session.select_current_page() {
                Ok(added) => format!("Selected {} artwork(s) on this page", added),
                Err(e) => e.to_string(),
            },
            Command::DeselectPage => match session.deselect_current_page() {
                Ok(removed) => format!("Deselected {} artwork(s) on this page", removed),
                Err(e) => e.to_string(),
            },
            Command::Select(count) => match session.select_from_current(count).await {
                Ok(outcome) => render::render_outcome(&outcome),
                Err(e) => e.to_string(),
            },
            Command::Deselect(count) => match session.deselect_range(count) {
                Ok(ids) => format!("Deselected {} artwork(s)", ids.len()),
                Err(e) => e.to_string(),
            },
            Command::Clear => {
                session.store().clear();
                "Selection cleared".to_string()
            }
            Command::Selected => self.render_selected(),
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        }
    }

    async fn goto(&self, page: u32) -> String {
        if let Some(last) = self.session.total_pages() {
            if page > last {
                return format!("Page {} is out of range (1-{})", page, last);
            }
        }
        match self.session.load_page(page).await {
            Ok(_) => self.render_current(),
            Err(e) => format!("Failed to load page {}: {}", page, e),
        }
    }

    fn render_current(&self) -> String {
        match self.session.visible_page() {
            Some(page) => render::render_page(
                &page,
                self.session.store(),
                self.session.page_selection_state(),
                self.session.page_size(),
            ),
            None => ValidationError::NoPageLoaded.to_string(),
        }
    }

    fn render_selected(&self) -> String {
        let ids = self.session.store().ids();
        let Some(summary) = render::selection_summary(ids.len()) else {
            return "Nothing selected".to_string();
        };
        let mut lines = vec![summary];
        lines.extend(ids.into_iter().map(|id| format!("  {}", self.label(id))));
        lines.join("\n")
    }

    fn label(&self, id: ItemId) -> String {
        match self.session.cache().get(id) {
            Some(artwork) => format!("{} ({})", id, artwork.title),
            None => id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use artworks_lib::api::Page;
    use artworks_lib::error::ApiError;
    use async_trait::async_trait;

    use super::*;

    struct Gallery {
        total: usize,
    }

    #[async_trait]
    impl PageFetcher for Gallery {
        type Item = Artwork;

        async fn fetch(&self, page: u32) -> Result<Page<Artwork>, ApiError> {
            let start = (page as u64 - 1) * 10 + 1;
            let end = (start + 9).min(self.total as u64);
            let items = (start..=end)
                .map(|id| Artwork::new(id).with_title(format!("Study No. {id}")))
                .collect();
            Ok(Page::new(page, items, self.total))
        }

        fn page_size(&self) -> usize {
            10
        }
    }

    fn shell(total: usize) -> Shell<Gallery> {
        Shell::new(SelectionSession::new(Gallery { total }))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(Command::parse("page 3"), Ok(Some(Command::Page(3))));
        assert_eq!(Command::parse("NEXT"), Ok(Some(Command::Next)));
        assert_eq!(
            Command::parse("toggle 129884"),
            Ok(Some(Command::Toggle(ItemId(129884))))
        );
        assert_eq!(
            Command::parse("check 1 3 5"),
            Ok(Some(Command::Check(vec![ItemId(1), ItemId(3), ItemId(5)])))
        );
        assert_eq!(Command::parse("check"), Ok(Some(Command::Check(Vec::new()))));
        assert_eq!(
            Command::parse("select 25"),
            Ok(Some(Command::Select(RangeCount::new(25).unwrap())))
        );
        assert_eq!(Command::parse("q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("page 0"),
            Err(CommandError::InvalidPage("0".to_string()))
        );
        assert_eq!(
            Command::parse("select"),
            Err(CommandError::MissingArgument {
                command: "select",
                expected: "a count"
            })
        );
        assert_eq!(
            Command::parse("select -4"),
            Err(CommandError::Validation(ValidationError::Negative(-4)))
        );
        assert_eq!(
            Command::parse("select 99999999999999999999"),
            Err(CommandError::Validation(ValidationError::TooLarge(
                "99999999999999999999".to_string()
            )))
        );
        assert_eq!(
            Command::parse("deselect 0"),
            Err(CommandError::Validation(ValidationError::Zero))
        );
        assert_eq!(
            Command::parse("check 1 x"),
            Err(CommandError::InvalidId("x".to_string()))
        );
        assert!(matches!(
            Command::parse("dance"),
            Err(CommandError::Unknown(_))
        ));
    }

    #[tokio::test]
    async fn test_select_across_pages() {
        let shell = shell(95);
        shell.execute(Command::Page(9)).await;

        let out = shell
            .execute(Command::Select(RangeCount::new(25).unwrap()))
            .await;

        assert_eq!(
            out,
            "Selected 15 of 25 requested (15 new, 2 page(s) fetched); reached the end of the collection"
        );
        assert_eq!(shell.session.store().count(), 15);
    }

    #[tokio::test]
    async fn test_navigation_bounds() {
        let shell = shell(15);

        assert_eq!(shell.execute(Command::Prev).await, "Already on the first page");
        let out = shell.execute(Command::Next).await;
        assert!(out.contains("Page 1 of 2"));

        shell.execute(Command::Next).await;
        assert_eq!(shell.execute(Command::Next).await, "Already on the last page");
        assert_eq!(
            shell.execute(Command::Page(7)).await,
            "Page 7 is out of range (1-2)"
        );
    }

    #[tokio::test]
    async fn test_check_and_selected_listing() {
        let shell = shell(95);
        shell.execute(Command::Page(1)).await;
        shell.execute(Command::Toggle(ItemId(50))).await;

        let out = shell
            .execute(Command::Check(vec![ItemId(2), ItemId(77)]))
            .await;
        assert_eq!(
            out,
            "1 selected, 0 deselected on this page\nIgnored ids not on this page: 77"
        );

        let listing = shell.execute(Command::Selected).await;
        assert_eq!(
            listing,
            "2 rows selected across all pages\n  50\n  2 (Study No. 2)"
        );
    }

    #[tokio::test]
    async fn test_deselect_more_than_selected() {
        let shell = shell(95);
        let out = shell
            .execute(Command::Deselect(RangeCount::new(3).unwrap()))
            .await;
        assert_eq!(out, "count 3 exceeds the maximum of 0");
    }
}
