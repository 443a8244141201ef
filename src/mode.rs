//! Mode Engine: applies a signed channel-mode string plus arguments to a
//! [`Channel`] record, per spec §4.8. ~15% of the component share, and the
//! most delicate piece in the crate (spec §1): stacking vs. overwrite vs.
//! flag-only mode classes, prefix modes, extbans and carried exceptions.

use crate::state::{Channel, Mode, ServerState};

/// An extban, as recovered from a mode argument that begins with the
/// server's `extban_prefix` (spec §4.8 step 3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtbanKind {
    Account,
    Channel,
    Raw,
}

fn parse_extban(argument: &str, server: &ServerState) -> Option<(bool, ExtbanKind, String)> {
    let rest = argument.strip_prefix(server.extban_prefix)?;
    let (negated, rest) = match rest.strip_prefix('~') {
        Some(r) => (true, r),
        None => (false, rest),
    };
    let mut chars = rest.chars();
    let selector = chars.next()?;
    let data = chars.as_str().trim_start_matches(':').to_string();
    let kind = match selector {
        'a' | 'R' => ExtbanKind::Account,
        'j' | 'c' => ExtbanKind::Channel,
        _ => ExtbanKind::Raw,
    };
    Some((negated, kind, data))
}

/// True if `argument` looks like a full `nick!user@host` mask.
fn is_user_mask(argument: &str) -> bool {
    argument.contains('!') && argument.contains('@')
}

fn build_mode(letter: char, argument: &str, server: &ServerState) -> Mode {
    let mut mode = Mode {
        letter,
        argument: argument.to_string(),
        negated: false,
        ..Mode::default()
    };
    if let Some((negated, kind, data)) = parse_extban(argument, server) {
        mode.negated = negated;
        match kind {
            ExtbanKind::Account => mode.account = Some(data),
            ExtbanKind::Channel => mode.channel = Some(data),
            ExtbanKind::Raw => {}
        }
    } else if is_user_mask(argument) {
        mode.user = Some(argument.to_string());
    }
    mode
}

/// Apply `mode_string`/`args` to `channel`, per spec §4.8's algorithm:
///
/// 1. Detect and strip a leading sign (default `+`).
/// 2. Reverse both the mode letters and the argument tokens, then
///    pairwise right-aligned zip — letters dominate; unmatched letters get
///    no argument. This is a literal contract (spec §9): "attempts to fix
///    it will break stacking."
/// 3. Dispatch each `(letter, argument)` pair by sign and mode class,
///    carrying exception/invex arguments forward onto the next A-class
///    mode encountered in the (already-reversed) stream.
pub fn apply_mode_string(channel: &mut Channel, server: &ServerState, mode_string: &str, args: &[&str]) {
    let (add_default, letters) = match mode_string.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => match mode_string.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, mode_string),
        },
    };

    let mut signed_letters: Vec<(bool, char)> = Vec::with_capacity(letters.len());
    let mut add = add_default;
    for c in letters.chars() {
        match c {
            '+' => add = true,
            '-' => add = false,
            letter => signed_letters.push((add, letter)),
        }
    }

    signed_letters.reverse();
    let reversed_args: Vec<&str> = args.iter().rev().copied().collect();

    let mut carried_exceptions: Vec<String> = Vec::new();

    for (i, &(add, letter)) in signed_letters.iter().enumerate() {
        let argument = reversed_args.get(i).copied().unwrap_or("");

        if letter == server.excepts_char || letter == server.invex_char {
            carried_exceptions.push(argument.to_string());
            continue;
        }

        let mut mode = build_mode(letter, argument, server);

        if server.prefixchars.values().any(|&l| l == letter) {
            let entry = channel.mods.entry(letter).or_default();
            if add {
                entry.insert(argument.to_string());
            } else {
                entry.remove(argument);
            }
            continue;
        }

        if server.a_modes.contains(letter) {
            if add {
                if let Some(existing) = channel
                    .modes
                    .iter_mut()
                    .find(|m| m.letter == letter && m.argument == argument)
                {
                    existing.exceptions.append(&mut carried_exceptions);
                } else {
                    mode.exceptions = std::mem::take(&mut carried_exceptions);
                    // Processing walks the reversed stream right-to-left;
                    // insert at the front so the stored order matches the
                    // mode string's original left-to-right appearance.
                    channel.modes.insert(0, mode);
                }
            } else {
                channel
                    .modes
                    .retain(|m| !(m.letter == letter && m.argument == argument));
            }
            continue;
        }

        if server.b_modes.contains(letter) || server.c_modes.contains(letter) {
            if add {
                if let Some(existing) = channel.modes.iter_mut().find(|m| m.letter == letter) {
                    *existing = mode;
                } else {
                    channel.modes.insert(0, mode);
                }
            } else {
                channel.modes.retain(|m| m.letter != letter);
            }
            continue;
        }

        // D-class or unknown: flag-only.
        if add {
            channel.modechars.insert(letter);
        } else {
            channel.modechars.remove(&letter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Channel;

    fn server() -> ServerState {
        let mut s = ServerState::default();
        s.prefixes = "ov".to_string();
        s.prefixchars = std::collections::HashMap::from([('@', 'o'), ('+', 'v')]);
        s.a_modes = "eIb".to_string();
        s.b_modes = "k".to_string();
        s.c_modes = "flj".to_string();
        s.d_modes = "ns".to_string();
        s
    }

    #[test]
    fn prefix_modes_stack_into_mods_set() {
        let server = server();
        let mut channel = Channel::default();
        apply_mode_string(&mut channel, &server, "+oo", &["A", "B"]);
        let holders: std::collections::BTreeSet<_> =
            channel.mods[&'o'].iter().cloned().collect();
        assert_eq!(
            holders,
            std::collections::BTreeSet::from(["A".to_string(), "B".to_string()])
        );
        apply_mode_string(&mut channel, &server, "-o", &["A"]);
        assert_eq!(channel.mods[&'o'].len(), 1);
        assert!(channel.mods[&'o'].contains("B"));
    }

    #[test]
    fn carried_exceptions_attach_to_preceding_a_mode() {
        let server = server();
        let mut channel = Channel::default();
        apply_mode_string(&mut channel, &server, "+bbe", &["mask1", "mask2", "exc"]);
        assert_eq!(channel.modes.len(), 2);
        assert_eq!(channel.modes[1].exceptions, vec!["exc".to_string()]);
    }

    #[test]
    fn flag_only_modes_do_not_create_mode_records() {
        let server = server();
        let mut channel = Channel::default();
        apply_mode_string(&mut channel, &server, "+ns", &[]);
        assert!(channel.modechars.contains(&'n'));
        assert!(channel.modechars.contains(&'s'));
        assert_eq!(channel.modes.len(), 0);
    }

    #[test]
    fn scenario_six_mode_sequence() {
        let server = server();
        let mut channel = Channel::default();
        apply_mode_string(
            &mut channel,
            &server,
            "+b",
            &["nyxbot!~NaN@*.freenode.org"],
        );
        assert_eq!(channel.modes.len(), 1);

        apply_mode_string(
            &mut channel,
            &server,
            "+bbe",
            &["h!*@*", "z!ident@*", "N!~I@A"],
        );
        assert_eq!(channel.modes.len(), 3);

        apply_mode_string(&mut channel, &server, "-b", &["*!*@*"]);
        assert_eq!(channel.modes.len(), 3);
    }

    #[test]
    fn b_class_modes_overwrite_by_letter() {
        let server = server();
        let mut channel = Channel::default();
        apply_mode_string(&mut channel, &server, "+k", &["secret1"]);
        apply_mode_string(&mut channel, &server, "+k", &["secret2"]);
        assert_eq!(channel.modes.len(), 1);
        assert_eq!(channel.modes[0].argument, "secret2");
    }
}
