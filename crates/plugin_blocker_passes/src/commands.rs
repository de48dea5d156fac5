//! Console commands exposed by the plugin.

use crate::host::{HostEngine, PlayerSlot};

/// Reloads the configuration from disk.
pub const COMMAND_RELOAD: &str = "css_bp_reload";

/// Admin flag required to run [`COMMAND_RELOAD`].
pub const RELOAD_PERMISSION: &str = "@css/root";

pub const RELOAD_SUCCESS_MESSAGE: &str = "Configuration successfully rebooted";

pub const PERMISSION_DENIED_MESSAGE: &str =
    "[CSS] You do not have the correct permissions to execute this command.";

/// Who issued a console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandCaller {
    /// The server console, which holds every permission.
    Console,
    /// A connected player typing the command in their console or chat.
    Player(PlayerSlot),
}

impl CommandCaller {
    /// Whether the caller holds `permission`.
    pub fn is_authorized(self, host: &dyn HostEngine, permission: &str) -> bool {
        match self {
            CommandCaller::Console => true,
            CommandCaller::Player(slot) => host.player_has_permission(slot, permission),
        }
    }

    /// Sends a reply to the caller: private chat for players, stdout for the console.
    pub fn reply(self, host: &mut dyn HostEngine, message: &str) {
        match self {
            CommandCaller::Console => println!("{message}"),
            CommandCaller::Player(slot) => host.print_to_chat(slot, message),
        }
    }
}

/// Result of running a console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    PermissionDenied,
    /// The command ran but failed; the message was shown to the caller.
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::recording::RecordingHost;

    #[test]
    fn test_console_is_always_authorized() {
        let host = RecordingHost::new("de_mirage");
        assert!(CommandCaller::Console.is_authorized(&host, RELOAD_PERMISSION));
    }

    #[test]
    fn test_player_needs_permission() {
        let mut host = RecordingHost::new("de_mirage");
        let caller = CommandCaller::Player(PlayerSlot(3));
        assert!(!caller.is_authorized(&host, RELOAD_PERMISSION));

        host.grant_permission(PlayerSlot(3), RELOAD_PERMISSION);
        assert!(caller.is_authorized(&host, RELOAD_PERMISSION));
    }

    #[test]
    fn test_player_reply_goes_to_private_chat() {
        let mut host = RecordingHost::new("de_mirage");
        CommandCaller::Player(PlayerSlot(3)).reply(&mut host, "done");

        assert_eq!(host.chat_for(PlayerSlot(3)), vec!["done"]);
        assert!(host.broadcasts().is_empty());
    }

    #[test]
    fn test_console_reply_skips_chat() {
        let mut host = RecordingHost::new("de_mirage");
        CommandCaller::Console.reply(&mut host, "done");

        assert!(host.calls().is_empty());
    }
}
