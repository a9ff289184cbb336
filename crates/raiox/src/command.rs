//! Parsing of terminal input lines.

/// Prefix that marks a line as a command.
pub const COMMAND_PREFIX: char = ':';

/// A line ending with this character continues on the next line.
pub const CONTINUATION: char = '\\';

/// A command typed at the prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `:cliente <id>`, switch to another customer. The identifier may be
    /// empty, which clears the selection.
    Customer(String),
    /// `:limpar`, forget everything.
    Reset,
    /// `:conversa`, print the conversation again.
    Conversation,
    /// `:ajuda`
    Help,
    /// `:sair`
    Quit,
    Unknown(String),
}

/// One line of input, already stripped of its line terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Command(Command),
    /// Text that ends with [`CONTINUATION`]; the marker is removed.
    Continued(&'a str),
    Text(&'a str),
}

impl<'a> Input<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = strip_line_ending(line);
        if let Some(command) = line.strip_prefix(COMMAND_PREFIX) {
            return Input::Command(Command::parse(command));
        }
        match line.strip_suffix(CONTINUATION) {
            Some(text) => Input::Continued(text),
            None => Input::Text(line),
        }
    }
}

impl Command {
    fn parse(command: &str) -> Self {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command.trim_end(), ""),
        };
        match name {
            "cliente" => Command::Customer(arg.to_owned()),
            "limpar" => Command::Reset,
            "conversa" => Command::Conversation,
            "ajuda" => Command::Help,
            "sair" => Command::Quit,
            _ => Command::Unknown(name.to_owned()),
        }
    }
}

/// Removes one trailing `\n` or `\r\n`, nothing else.
///
/// Identifiers are matched exactly, so surrounding spaces are kept.
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Input::parse(":cliente 12345\n"),
            Input::Command(Command::Customer("12345".to_owned()))
        );
        assert_eq!(
            Input::parse(":cliente\n"),
            Input::Command(Command::Customer(String::new()))
        );
        assert_eq!(Input::parse(":limpar"), Input::Command(Command::Reset));
        assert_eq!(
            Input::parse(":conversa\r\n"),
            Input::Command(Command::Conversation)
        );
        assert_eq!(Input::parse(":ajuda"), Input::Command(Command::Help));
        assert_eq!(Input::parse(":sair\n"), Input::Command(Command::Quit));
        assert_eq!(
            Input::parse(":voltar"),
            Input::Command(Command::Unknown("voltar".to_owned()))
        );
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            Input::parse("Qual o modem?\n"),
            Input::Text("Qual o modem?")
        );
        assert_eq!(
            Input::parse("Compare com a célula \\\n"),
            Input::Continued("Compare com a célula ")
        );
        assert_eq!(Input::parse(" C-1 \n"), Input::Text(" C-1 "));
        assert_eq!(Input::parse("\n"), Input::Text(""));
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("a\r\n"), "a");
        assert_eq!(strip_line_ending("a\n\n"), "a\n");
        assert_eq!(strip_line_ending("a\r"), "a\r");
        assert_eq!(strip_line_ending("a"), "a");
    }
}
