/// Intents typed into the interactive reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderCommand {
    List,
    Search(String),
    Clear,
    Refresh,
    /// 1-based position in the shown list, or an article id.
    Open(String),
    Summary,
    Translate,
    Original,
    Listen,
    Close,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list              show the current list
  search <text>     filter by title, summary or source
  clear             drop the filter
  refresh           reload the feed
  open <n|id>       open an article
  summary           show the generated summary
  translate         show the translation
  original          show the original text
  listen            play the article as a two-host podcast script
  close             close the article
  quit              exit";

impl ReaderCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" | "list" | "ls" => Ok(ReaderCommand::List),
            "search" | "/" => Ok(ReaderCommand::Search(rest.to_string())),
            "clear" => Ok(ReaderCommand::Clear),
            "refresh" | "r" => Ok(ReaderCommand::Refresh),
            "open" | "o" if !rest.is_empty() => Ok(ReaderCommand::Open(rest.to_string())),
            "open" | "o" => Err("usage: open <n|id>".to_string()),
            "summary" | "s" => Ok(ReaderCommand::Summary),
            "translate" | "t" => Ok(ReaderCommand::Translate),
            "original" => Ok(ReaderCommand::Original),
            "listen" => Ok(ReaderCommand::Listen),
            "close" | "c" => Ok(ReaderCommand::Close),
            "help" | "?" => Ok(ReaderCommand::Help),
            "quit" | "exit" | "q" => Ok(ReaderCommand::Quit),
            other => Err(format!("unknown command: {} (try help)", other)),
        }
    }
}
