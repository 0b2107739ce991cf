//! Bot commands.

mod github;

use crate::{BeaconError, Data};

/// Convenient type alias for [poise::Command].
pub type Command = poise::Command<Data, BeaconError>;

/// Lists all the implemented commands
pub fn list() -> Vec<Command> {
    vec![github::github()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_slash_commands() {
        let commands = list();
        let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, ["github"]);
        assert!(commands.iter().all(|c| c.slash_action.is_some()));
    }
}
