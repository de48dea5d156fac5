//! Chat color tags.
//!
//! Messages in the configuration use bracket tags such as `{RED}` or
//! `{DEFAULT}`. The host chat renderer understands single control bytes
//! instead, so tags are swapped for their byte right before a message is sent.

/// Placeholder replaced with the configured player threshold.
pub const MIN_PLAYERS_TAG: &str = "{MINPLAYERS}";

/// A color understood by the in-game chat renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatColor {
    Default,
    Red,
    LightPurple,
    Green,
    Lime,
    LightGreen,
    LightRed,
    Gray,
    LightOlive,
    Olive,
    LightBlue,
    Blue,
    Purple,
    GrayBlue,
}

impl ChatColor {
    /// Every color, in the order tags are substituted.
    pub const ALL: [ChatColor; 14] = [
        ChatColor::Default,
        ChatColor::Red,
        ChatColor::LightPurple,
        ChatColor::Green,
        ChatColor::Lime,
        ChatColor::LightGreen,
        ChatColor::LightRed,
        ChatColor::Gray,
        ChatColor::LightOlive,
        ChatColor::Olive,
        ChatColor::LightBlue,
        ChatColor::Blue,
        ChatColor::Purple,
        ChatColor::GrayBlue,
    ];

    /// The bracket tag written in configuration files.
    pub fn tag(self) -> &'static str {
        match self {
            ChatColor::Default => "{DEFAULT}",
            ChatColor::Red => "{RED}",
            ChatColor::LightPurple => "{LIGHTPURPLE}",
            ChatColor::Green => "{GREEN}",
            ChatColor::Lime => "{LIME}",
            ChatColor::LightGreen => "{LIGHTGREEN}",
            ChatColor::LightRed => "{LIGHTRED}",
            ChatColor::Gray => "{GRAY}",
            ChatColor::LightOlive => "{LIGHTOLIVE}",
            ChatColor::Olive => "{OLIVE}",
            ChatColor::LightBlue => "{LIGHTBLUE}",
            ChatColor::Blue => "{BLUE}",
            ChatColor::Purple => "{PURPLE}",
            ChatColor::GrayBlue => "{GRAYBLUE}",
        }
    }

    /// The control byte the chat renderer switches color on.
    pub fn code(self) -> char {
        match self {
            ChatColor::Default => '\x01',
            ChatColor::Red => '\x02',
            ChatColor::LightPurple => '\x03',
            ChatColor::Green => '\x04',
            ChatColor::Lime => '\x05',
            ChatColor::LightGreen => '\x06',
            ChatColor::LightRed => '\x07',
            ChatColor::Gray => '\x08',
            ChatColor::LightOlive => '\x09',
            ChatColor::Olive => '\x10',
            ChatColor::LightBlue => '\x0B',
            ChatColor::Blue => '\x0C',
            ChatColor::Purple => '\x0E',
            ChatColor::GrayBlue => '\x0A',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.code() == code)
    }
}

/// Replaces every color tag in `input` with its control byte.
pub fn replace_color_tags(input: &str) -> String {
    ChatColor::ALL
        .iter()
        .fold(input.to_string(), |text, color| {
            text.replace(color.tag(), &color.code().to_string())
        })
}

/// Turns control bytes back into readable tags, for logs and terminals.
///
/// Tabs and newlines share their bytes with `{LIGHTOLIVE}` and `{GRAYBLUE}`
/// and are left as whitespace.
pub fn strip_color_codes(input: &str) -> String {
    input
        .chars()
        .map(|c| match ChatColor::from_code(c) {
            Some(color) if !c.is_ascii_whitespace() => color.tag().to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Builds the chat text announced when blockers are placed.
pub fn format_announcement(template: &str, min_players: u32) -> String {
    replace_color_tags(&template.replace(MIN_PLAYERS_TAG, &min_players.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_tag_is_replaced() {
        for color in ChatColor::ALL {
            let text = format!("a{}b", color.tag());
            assert_eq!(replace_color_tags(&text), format!("a{}b", color.code()));
        }
    }

    #[test]
    fn test_codes_are_unique_single_bytes() {
        let codes: HashSet<char> = ChatColor::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), 14);
        assert!(codes.iter().all(|c| c.len_utf8() == 1));
    }

    #[test]
    fn test_replacements_never_form_tags() {
        let all_tags: String = ChatColor::ALL.iter().map(|c| c.tag()).collect();
        let replaced = replace_color_tags(&all_tags);
        assert!(!replaced.contains('{'));
        assert_eq!(replaced.chars().count(), 14);
    }

    #[test]
    fn test_repeated_and_unknown_tags() {
        assert_eq!(replace_color_tags("{RED}x{RED}"), "\x02x\x02");
        assert_eq!(replace_color_tags("{PINK} stays"), "{PINK} stays");
        assert_eq!(replace_color_tags("{red}"), "{red}");
    }

    #[test]
    fn test_format_announcement() {
        let message = format_announcement("[{BLUE} BP {DEFAULT}] need {RED}{MINPLAYERS}{DEFAULT}", 6);
        assert_eq!(message, "[\x0C BP \x01] need \x026\x01");
    }

    #[test]
    fn test_strip_color_codes() {
        assert_eq!(strip_color_codes("\x02hot\x01 cold"), "{RED}hot{DEFAULT} cold");
        assert_eq!(strip_color_codes(&replace_color_tags("{PURPLE}x")), "{PURPLE}x");
    }

    #[test]
    fn test_strip_keeps_tabs_and_newlines() {
        assert_eq!(strip_color_codes("line one\nline\ttwo\x02!"), "line one\nline\ttwo{RED}!");
    }
}
