//! Integration tests driving the full dispatcher over realistic inbound
//! lines. Unlike a wire-format library, this crate never re-serializes a
//! line (spec: "the core does not emit; it only receives"), so these
//! exercise the tokenizer → typestring → specialcase pipeline end to end
//! instead of a parse/serialize/reparse identity.

use ircparse_core::event::EventKind;
use ircparse_core::state::Session;
use ircparse_core::to_event;

fn session() -> Session {
    Session::new("nyxbot^")
}

#[test]
fn ping_is_accepted_without_a_prefix() {
    let mut s = session();
    let event = to_event("PING :irc.example.com", &mut s).unwrap();
    assert_eq!(event.kind, EventKind::Ping);
    assert_eq!(event.content, "irc.example.com");
}

#[test]
fn privmsg_with_prefix_and_channel_target() {
    let mut s = session();
    let event = to_event(
        ":nick!user@host PRIVMSG #channel :Hello, world!",
        &mut s,
    )
    .unwrap();
    assert_eq!(event.kind, EventKind::Chan);
    assert_eq!(event.sender.nickname, "nick");
    assert_eq!(event.channel, "#channel");
    assert_eq!(event.content, "Hello, world!");
}

#[test]
fn tagged_privmsg_decodes_tags() {
    let mut s = session();
    let event = to_event(
        "@time=2023-01-01T00:00:00.000Z;msgid=abc123 :nick!user@host PRIVMSG #channel :Tagged message",
        &mut s,
    )
    .unwrap();
    assert!(event
        .tags
        .iter()
        .any(|(k, v)| k == "time" && v == "2023-01-01T00:00:00.000Z"));
    assert!(event.tags.iter().any(|(k, v)| k == "msgid" && v == "abc123"));
}

#[test]
fn numeric_welcome_response() {
    let mut s = session();
    s.server.address = "server".to_string();
    let event = to_event(":server 001 nyxbot^ :Welcome to the IRC Network", &mut s).unwrap();
    assert_eq!(event.kind, EventKind::RplWelcome);
    assert_eq!(event.num, 1);
}

#[test]
fn empty_trailing_privmsg_has_empty_content() {
    let mut s = session();
    let event = to_event(":nick!user@host PRIVMSG #channel :", &mut s).unwrap();
    assert_eq!(event.content, "");
}

#[test]
fn mode_command_grants_op() {
    let mut s = session();
    s.server.prefixchars = std::collections::HashMap::from([('@', 'o'), ('+', 'v')]);
    to_event(":server MODE #channel +o nick", &mut s).unwrap();
    assert!(s.channel("#channel").unwrap().mods[&'o'].contains("nick"));
}

#[test]
fn join_variations_all_parse() {
    let cases = [
        "JOIN #channel",
        ":nick!user@host JOIN #channel",
        "JOIN #channel1,#channel2",
    ];
    for raw in cases {
        let mut s = session();
        let event = to_event(raw, &mut s).unwrap_or_else(|e| panic!("{raw}: {e}"));
        assert!(matches!(event.kind, EventKind::Join | EventKind::SelfJoin));
    }
}

#[test]
fn kick_with_reason() {
    let mut s = session();
    let event = to_event(
        ":op!o@host KICK #channel nick :Bad behavior",
        &mut s,
    )
    .unwrap();
    assert_eq!(event.kind, EventKind::Kick);
    assert_eq!(event.channel, "#channel");
    assert_eq!(event.target.nickname, "nick");
    assert_eq!(event.content, "Bad behavior");
}

#[test]
fn quit_with_reason() {
    let mut s = session();
    let event = to_event(":nick!u@h QUIT :Gone fishing", &mut s).unwrap();
    assert_eq!(event.kind, EventKind::Quit);
    assert_eq!(event.content, "Gone fishing");
}

#[test]
fn special_characters_in_message_survive() {
    let mut s = session();
    let event = to_event(
        ":nick!user@host PRIVMSG #channel :Message with \u{00fc}\u{00f1}\u{00ed}\u{00e7}\u{00f8}d\u{00e9} and \u{1f389}",
        &mut s,
    )
    .unwrap();
    assert!(event.content.contains('\u{00fc}'));
    assert!(event.content.contains('\u{1f389}'));
}
