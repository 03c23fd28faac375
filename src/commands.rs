use crate::persona;

const SET_RELATION: &str = "!setrelation";
const RELATION: &str = "!relation";
const JOIN: &str = "!join";

/// What an inbound message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetRelation(Option<String>),
    Relation(Option<String>),
    Join,
    Chat,
    Ignore,
}

impl Command {
    /// Command tokens are prefix-matched case-insensitively; the argument keeps
    /// the case the user typed.
    pub fn parse(content: &str) -> Self {
        let lower = content.to_lowercase();

        if lower.starts_with(SET_RELATION) {
            return Command::SetRelation(first_arg(content));
        }
        if lower.starts_with(RELATION) {
            return Command::Relation(first_arg(content));
        }
        if lower == JOIN {
            return Command::Join;
        }
        if persona::is_triggered(&lower) {
            return Command::Chat;
        }
        Command::Ignore
    }
}

fn first_arg(content: &str) -> Option<String> {
    content.split_whitespace().nth(1).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setrelation() {
        assert_eq!(
            Command::parse("!setrelation Auntie"),
            Command::SetRelation(Some("Auntie".into()))
        );
        assert_eq!(
            Command::parse("!SetRelation   uncle extra words"),
            Command::SetRelation(Some("uncle".into()))
        );
        assert_eq!(Command::parse("!setrelation"), Command::SetRelation(None));
        assert_eq!(Command::parse("!setrelation   "), Command::SetRelation(None));
    }

    #[test]
    fn test_relation() {
        assert_eq!(Command::parse("!relation"), Command::Relation(None));
        assert_eq!(
            Command::parse("!RELATION Grandma"),
            Command::Relation(Some("Grandma".into()))
        );
    }

    #[test]
    fn test_join_is_exact() {
        assert_eq!(Command::parse("!join"), Command::Join);
        assert_eq!(Command::parse("!JOIN"), Command::Join);
        assert_eq!(Command::parse("!join now"), Command::Ignore);
    }

    #[test]
    fn test_commands_win_over_triggers() {
        assert_eq!(
            Command::parse("!setrelation alex"),
            Command::SetRelation(Some("alex".into()))
        );
        assert_eq!(Command::parse("hi Alex"), Command::Chat);
        assert_eq!(Command::parse("just chatting"), Command::Ignore);
    }
}
