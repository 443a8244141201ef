//! Specialcase Dispatcher: the top-level entry point tying every other
//! module together. ~35% of the component share (spec §2) — the single
//! most load-bearing piece in the crate.
//!
//! Data flow for one inbound line (spec §2): raw bytes → tokenizer → tag
//! decode → prefix parse → typestring parse → specialcase dispatch →
//! sanity postpass → event record. The dispatcher may re-enter itself when
//! a generic `NOTICE` is reclassified as `AUTH_CHALLENGE`/`RPL_LOGGEDIN`/
//! `AUTH_FAILURE` (spec §4.6) — here that re-entrance is just a kind
//! reassignment at the end of [`handle_notice`], since no further
//! specialcase fields need extracting for those three kinds.

use crate::ctcp;
use crate::error::{ParseError, PartialParseError};
use crate::event::{Event, EventKind, SenderClass};
use crate::isupport;
use crate::mode;
use crate::prefix::Prefix;
use crate::sanity;
use crate::sender;
use crate::state::Session;
use crate::tags;
use crate::tokenizer;
use crate::typestring;
use crate::validation;

const UNPREFIXED_COMMANDS: &[&str] = &["PING", "ERROR", "PONG", "NOTICE", "AUTHENTICATE"];

const AUTH_SUCCESS_PHRASES: &[&str] = &[
    "you are now identified",
    "you are successfully identified",
    "you are now logged in as",
    "password accepted",
];

const AUTH_FAILURE_PHRASES: &[&str] = &[
    "invalid password",
    "authentication failed",
    "password incorrect",
    "access denied",
];

/// Diagnostic name for `kind`, as used by the Sanity Postpass's allow-lists
/// (spec §4.9), which are expressed over names rather than the Rust enum
/// discriminant since several entries (e.g. the `RPL_WHOIS*` cluster) cover
/// more than one concrete kind.
fn kind_name(kind: EventKind) -> &'static str {
    use EventKind::*;
    match kind {
        Join => "JOIN",
        SelfJoin => "SELFJOIN",
        Part => "PART",
        SelfPart => "SELFPART",
        Nick => "NICK",
        SelfNick => "SELFNICK",
        ChannelMode | SelfMode => "MODE",
        Query | SelfQuery => "QUERY",
        RplWhoreply => "RPL_WHOREPLY",
        RplWhoisuser => "RPL_WHOISUSER",
        RplWhoischannels => "RPL_WHOISCHANNELS",
        RplWhoisserver => "RPL_WHOISSERVER",
        RplWhoishost => "RPL_WHOISHOST",
        RplWhoisidle => "RPL_WHOISIDLE",
        RplLoggedin => "RPL_LOGGEDIN",
        RplWhoisaccount => "RPL_WHOISACCOUNT",
        RplEndofwhois => "RPL_ENDOFWHOIS",
        ErrNosuchchannel => "ERR_NOSUCHCHANNEL",
        RplEndofwho => "RPL_ENDOFWHO",
        RplNamreply => "RPL_NAMREPLY",
        RplEndofnames => "RPL_ENDOFNAMES",
        RplList => "RPL_LIST",
        _ => "OTHER",
    }
}

/// Parse one complete inbound line, mutating `session` in place and
/// returning the assembled event. On a fatal error, returns the
/// partially-assembled event alongside the cause (spec §7).
pub fn to_event(line: &str, session: &mut Session) -> Result<Event, PartialParseError> {
    let mut event = Event::new(line);

    let raw_line = match tokenizer::tokenize(line) {
        Ok(r) => r,
        Err(msg) => {
            let err = if line.trim().is_empty() {
                ParseError::EmptyLine
            } else {
                ParseError::MalformedToken {
                    context: msg.to_string(),
                }
            };
            return Err(err.with_partial(event));
        }
    };

    if let Some(tags_str) = raw_line.tags {
        event.tags = tags::parse_tags(tags_str);
    }

    if let Some(prefix_str) = raw_line.prefix {
        match Prefix::parse(prefix_str) {
            Prefix::User { nick, user, host } => {
                event.sender.nickname = nick.to_string();
                event.sender.ident = user.unwrap_or("").to_string();
                event.sender.address = host.unwrap_or("").to_string();
            }
            Prefix::Server(addr) => {
                event.sender.address = addr.to_string();
            }
        }
    } else {
        let upper = raw_line.command.to_ascii_uppercase();
        if !UNPREFIXED_COMMANDS.contains(&upper.as_str()) {
            return Err(ParseError::UnknownBasicCommand(raw_line.command.to_string())
                .with_partial(event));
        }
    }

    event.sender.class = if sender::is_special(&event.sender, &session.server) {
        SenderClass::Special
    } else {
        SenderClass::Anyone
    };

    let resolved = match typestring::parse_typestring(raw_line.command, &session.numeric_table) {
        Ok(t) => t,
        Err(e) => return Err(e.with_partial(event)),
    };
    event.kind = resolved.kind;
    event.num = resolved.num;

    let is_self_sender =
        !event.sender.nickname.is_empty() && session.is_self(&event.sender.nickname);

    if let Err(e) = dispatch(&mut event, session, &raw_line.params, is_self_sender) {
        return Err(e.with_partial(event));
    }

    let chantypes = session.server.chantypes.clone();
    let client = session.client.clone();
    let name = kind_name(event.kind);
    sanity::run(&mut event, &client, &chantypes, name);

    Ok(event)
}

fn dispatch(
    event: &mut Event,
    session: &mut Session,
    params: &[&str],
    is_self_sender: bool,
) -> Result<(), ParseError> {
    use EventKind::*;

    let chantypes = session.server.chantypes.clone();
    let max_channel_length = session.server.max_channel_length;

    match event.kind {
        Join => {
            let channel = params.first().copied().unwrap_or("");
            event.channel = channel.to_string();
            if let Some(&acct) = params.get(1) {
                event.sender.account = if acct == "*" { String::new() } else { acct.to_string() };
            }
            if is_self_sender {
                event.kind = SelfJoin;
                session.channel_mut(channel);
            }
        }
        Part => {
            let channel = params.first().copied().unwrap_or("");
            event.channel = channel.to_string();
            if let Some(&reason) = params.get(1) {
                event.content = reason.trim_matches('"').to_string();
            }
            if is_self_sender {
                event.kind = SelfPart;
                session.forget_channel(channel);
            }
        }
        Nick => {
            let new_nick = params.first().copied().unwrap_or("");
            event.target.nickname = new_nick.to_string();
            if is_self_sender {
                event.kind = SelfNick;
                session.client.original_nickname = session.client.nickname.clone();
                session.client.nickname = new_nick.to_string();
                session.updated = true;
            }
        }
        Quit => {
            let reason = params.first().copied().unwrap_or("");
            event.content = reason.strip_prefix("Quit: ").unwrap_or(reason).to_string();
            if is_self_sender {
                event.kind = SelfQuit;
            }
        }
        Kick => {
            event.channel = params.first().copied().unwrap_or("").to_string();
            event.target.nickname = params.get(1).copied().unwrap_or("").to_string();
            if let Some(&reason) = params.get(2) {
                event.content = reason.to_string();
            }
            if is_self_sender {
                event.kind = SelfKick;
            }
        }
        Chan => handle_privmsg(event, params, is_self_sender, &chantypes, max_channel_length)?,
        ChannelMode => handle_mode(event, session, params, &chantypes, max_channel_length),
        RplIsupport => {
            event.target.nickname = params.first().copied().unwrap_or("").to_string();
            isupport::apply_isupport(session, params.get(1..).unwrap_or(&[]));
        }
        RplMyinfo => {
            event.target.nickname = params.first().copied().unwrap_or("").to_string();
            let server_address = params.get(1).copied().unwrap_or("");
            if !server_address.is_empty() {
                session.server.address = server_address.to_string();
            }
            let version = params.get(2).copied().unwrap_or("");
            isupport::apply_myinfo(session, version, server_address);
        }
        Account => {
            let acct = params.first().copied().unwrap_or("");
            event.target.account = if acct == "*" { String::new() } else { acct.to_string() };
        }
        Chghost => {
            event.target.ident = params.first().copied().unwrap_or("").to_string();
            event.target.address = params.get(1).copied().unwrap_or("").to_string();
        }
        Away => {
            let content = params.first().copied().unwrap_or("");
            event.content = content.to_string();
            if content.is_empty() {
                event.kind = Back;
            }
        }
        ErrNeedpong => {
            let payload = params.last().copied().unwrap_or("");
            match payload.strip_prefix("To connect, type /QUOTE PONG ") {
                Some(token) => event.aux = token.to_string(),
                None => return Err(ParseError::UnknownConnectHint(payload.to_string())),
            }
        }
        Hello => {
            if !event.sender.address.is_empty() {
                session.server.resolved_address = event.sender.address.clone();
            }
            general_heuristics(event, params, &chantypes, max_channel_length);
        }
        Notice => handle_notice(
            event,
            params,
            &chantypes,
            max_channel_length,
            &mut session.server.resolved_address,
        ),
        TwitchHostStart => handle_twitch_hosttarget(event, params),
        _ => general_heuristics(event, params, &chantypes, max_channel_length),
    }

    Ok(())
}

fn handle_privmsg(
    event: &mut Event,
    params: &[&str],
    is_self_sender: bool,
    chantypes: &str,
    max_channel_length: usize,
) -> Result<(), ParseError> {
    let target = params.first().copied().unwrap_or("");
    let content = params.get(1).copied().unwrap_or("");

    if validation::is_valid_channel(target, chantypes, max_channel_length) {
        event.channel = target.to_string();
        event.kind = if is_self_sender {
            EventKind::SelfChan
        } else {
            EventKind::Chan
        };
    } else {
        event.target.nickname = target.to_string();
        event.kind = if is_self_sender {
            EventKind::SelfQuery
        } else {
            EventKind::Query
        };
    }

    match ctcp::strip(content) {
        Some(c) if c.verb.eq_ignore_ascii_case("ACTION") => {
            event.kind = if is_self_sender {
                EventKind::SelfEmote
            } else {
                EventKind::Emote
            };
            event.content = c.data.unwrap_or("").to_string();
        }
        Some(c) if ctcp::is_known_verb(c.verb) => {
            event.kind = EventKind::CtcpOther;
            event.aux = c.verb.to_string();
            let data = c.data.unwrap_or("");
            event.content = if data == event.aux {
                String::new()
            } else {
                data.to_string()
            };
        }
        Some(c) => return Err(ParseError::UnknownCtcp(c.verb.to_string())),
        None => {
            event.content = content.to_string();
        }
    }

    Ok(())
}

fn handle_mode(
    event: &mut Event,
    session: &mut Session,
    params: &[&str],
    chantypes: &str,
    max_channel_length: usize,
) {
    let target = params.first().copied().unwrap_or("");
    if validation::is_valid_channel(target, chantypes, max_channel_length) {
        event.channel = target.to_string();
        let mode_string = params.get(1).copied().unwrap_or("");
        let args: Vec<&str> = params.get(2..).unwrap_or(&[]).to_vec();
        let server = session.server.clone();
        let channel = session.channel_mut(target);
        mode::apply_mode_string(channel, &server, mode_string, &args);
        session.updated = true;
    } else {
        event.kind = EventKind::SelfMode;
        let mode_string = params
            .get(1)
            .copied()
            .unwrap_or("")
            .trim_start_matches(':');
        session.client.apply_user_modes(mode_string);
        session.updated = true;
    }
}

fn handle_notice(
    event: &mut Event,
    params: &[&str],
    chantypes: &str,
    max_channel_length: usize,
    resolved_address: &mut String,
) {
    let target = params.first().copied().unwrap_or("");
    let content = params.get(1).copied().unwrap_or("");
    event.content = content.to_string();

    if validation::is_valid_channel(target, chantypes, max_channel_length) {
        event.channel = target.to_string();
    } else {
        event.target.nickname = target.to_string();
    }

    // A NOTICE with a server prefix (no nickname) is connection-greeting
    // chatter; its sender address is the server's actual resolved hostname.
    if event.sender.nickname.is_empty() && !event.sender.address.is_empty() {
        *resolved_address = event.sender.address.clone();
    }

    if sender::is_from_auth_service(&event.sender) {
        let lower = content.to_ascii_lowercase();
        if AUTH_FAILURE_PHRASES.iter().any(|p| lower.contains(p)) {
            event.kind = EventKind::AuthFailure;
        } else if AUTH_SUCCESS_PHRASES.iter().any(|p| lower.contains(p)) {
            event.kind = EventKind::RplLoggedin;
        } else {
            event.kind = EventKind::AuthChallenge;
        }
    }
}

fn handle_twitch_hosttarget(event: &mut Event, params: &[&str]) {
    let channel = params.first().copied().unwrap_or("");
    event.channel = channel.to_string();
    let trailing = params.get(1).copied().unwrap_or("");
    let mut parts = trailing.split_whitespace();
    let first = parts.next().unwrap_or("");
    let count = parts.next();

    if first == "-" {
        event.kind = EventKind::TwitchHostEnd;
    } else {
        event.kind = EventKind::TwitchHostStart;
        event.aux = first.to_string();
    }
    if let Some(c) = count {
        event.count = c.parse().unwrap_or(0);
    }
}

/// Fallback for any event kind with no bespoke handler above: fill
/// channel/target/content from positional heuristics, per spec §4.6's
/// General Heuristics ("look for colon-content, split targets by number
/// and position relative to bot nickname and chantypes").
fn general_heuristics(event: &mut Event, params: &[&str], chantypes: &str, max_channel_length: usize) {
    let Some(&first) = params.first() else {
        return;
    };
    if validation::is_valid_channel(first, chantypes, max_channel_length) {
        event.channel = first.to_string();
    } else {
        event.target.nickname = first.to_string();
    }
    if params.len() > 1 {
        event.content = params[1..].join(" ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daemon::Daemon;

    #[test]
    fn scenario_1_welcome_numeric() {
        let mut session = Session::new("nyxbot^");
        session.server.address = "adams.freenode.net".to_string();
        let event = to_event(
            ":adams.freenode.net 001 nyxbot^ :Welcome to the freenode Internet Relay Chat Network nyxbot^",
            &mut session,
        )
        .unwrap();
        assert_eq!(event.kind, EventKind::RplWelcome);
        assert_eq!(event.sender.address, "adams.freenode.net");
        assert_eq!(event.sender.class, SenderClass::Special);
        assert_eq!(event.target.nickname, "nyxbot^");
        assert_eq!(
            event.content,
            "Welcome to the freenode Internet Relay Chat Network nyxbot^"
        );
        assert_eq!(event.num, 1);
    }

    #[test]
    fn scenario_2_ctcp_action_becomes_emote() {
        let mut session = Session::new("bot");
        let event = to_event(
            ":zorael!~NaN@ns3363704.ip-94-23-253.eu PRIVMSG #flerrp :\x01ACTION 123 test test content\x01",
            &mut session,
        )
        .unwrap();
        assert_eq!(event.kind, EventKind::Emote);
        assert_eq!(event.sender.nickname, "zorael");
        assert_eq!(event.channel, "#flerrp");
        assert_eq!(event.content, "123 test test content");
    }

    #[test]
    fn known_ctcp_verb_becomes_ctcp_other() {
        let mut session = Session::new("bot");
        let event = to_event(
            ":zorael!~NaN@host PRIVMSG #flerrp :\x01VERSION\x01",
            &mut session,
        )
        .unwrap();
        assert_eq!(event.kind, EventKind::CtcpOther);
        assert_eq!(event.aux, "VERSION");
        assert_eq!(event.content, "");
    }

    #[test]
    fn unrecognised_ctcp_verb_raises_unknown_ctcp() {
        let mut session = Session::new("bot");
        let err = to_event(
            ":zorael!~NaN@host PRIVMSG #flerrp :\x01FROBNICATE foo\x01",
            &mut session,
        )
        .unwrap_err();
        assert!(matches!(err.source, ParseError::UnknownCtcp(ref verb) if verb == "FROBNICATE"));
    }

    #[test]
    fn scenario_3_twitch_hostend() {
        let mut session = Session::new("bot");
        to_event(":tmi.twitch.tv 004 bot tmi.twitch.tv :-", &mut session).unwrap();
        assert_eq!(session.server.daemon, Daemon::Twitch);

        let event = to_event(":tmi.twitch.tv HOSTTARGET #lirik :- 178", &mut session).unwrap();
        assert_eq!(event.kind, EventKind::TwitchHostEnd);
        assert_eq!(event.channel, "#lirik");
        assert_eq!(event.count, 178);
    }

    #[test]
    fn scenario_4_isupport_mutates_session() {
        let mut session = Session::new("nyxbot^");
        let event = to_event(
            ":cherryh.freenode.net 005 nyxbot^ CHANTYPES=# PREFIX=(ov)@+ CHANMODES=eIbq,k,flj,CFLMPQScgimnprstz NETWORK=freenode NICKLEN=16 CASEMAPPING=rfc1459 :are supported",
            &mut session,
        )
        .unwrap();
        assert_eq!(event.kind, EventKind::RplIsupport);
        assert_eq!(session.server.chantypes, "#");
        assert_eq!(session.server.prefixes, "ov");
        assert_eq!(session.server.prefixchars[&'@'], 'o');
        assert_eq!(session.server.prefixchars[&'+'], 'v');
        assert_eq!(session.server.a_modes, "eIbq");
        assert_eq!(session.server.b_modes, "k");
        assert_eq!(session.server.c_modes, "flj");
        assert_eq!(session.server.d_modes, "CFLMPQScgimnprstz");
        assert_eq!(session.server.network, "freenode");
        assert_eq!(session.server.max_nick_length, 16);
        assert_eq!(
            session.server.case_mapping,
            crate::casemap::CaseMapping::Rfc1459
        );
    }

    #[test]
    fn scenario_5_selfnick_updates_client_nickname() {
        let mut session = Session::new("nyxbot^");
        let event = to_event(
            ":nyxbot^!~NaN@81-233-105-62-no80.tbcn.telia.com NICK :nyxbot_",
            &mut session,
        )
        .unwrap();
        assert_eq!(event.kind, EventKind::SelfNick);
        assert_eq!(event.target.nickname, "nyxbot_");
        assert_eq!(session.client.nickname, "nyxbot_");
        assert!(session.updated);
    }

    #[test]
    fn scenario_6_mode_sequence_via_dispatch() {
        let mut session = Session::new("nyxbot^");
        session.server.a_modes = "eIb".to_string();
        session.server.b_modes = "k".to_string();
        session.server.c_modes = "flj".to_string();

        to_event(
            ":op!op@host MODE #chan +b nyxbot!~NaN@*.freenode.org",
            &mut session,
        )
        .unwrap();
        assert_eq!(session.channel("#chan").unwrap().modes.len(), 1);

        to_event(
            ":op!op@host MODE #chan +bbe h!*@* z!ident@* N!~I@A",
            &mut session,
        )
        .unwrap();
        assert_eq!(session.channel("#chan").unwrap().modes.len(), 3);

        to_event(":op!op@host MODE #chan -b *!*@*", &mut session).unwrap();
        assert_eq!(session.channel("#chan").unwrap().modes.len(), 3);
    }

    #[test]
    fn hello_captures_resolved_address() {
        let mut session = Session::new("bot");
        assert!(session.server.resolved_address.is_empty());
        to_event(
            ":cherryh.freenode.net 020 bot :Please wait while we process your connection",
            &mut session,
        )
        .unwrap();
        assert_eq!(session.server.resolved_address, "cherryh.freenode.net");
    }

    #[test]
    fn notice_with_server_prefix_captures_resolved_address() {
        let mut session = Session::new("bot");
        to_event(
            ":cherryh.freenode.net NOTICE * :*** Looking up your hostname...",
            &mut session,
        )
        .unwrap();
        assert_eq!(session.server.resolved_address, "cherryh.freenode.net");
    }

    #[test]
    fn unprefixed_ping_is_accepted() {
        let mut session = Session::new("bot");
        let event = to_event("PING :server.example", &mut session).unwrap();
        assert_eq!(event.kind, EventKind::Ping);
    }

    #[test]
    fn unprefixed_unknown_command_is_rejected() {
        let mut session = Session::new("bot");
        let err = to_event("FROBNICATE foo", &mut session).unwrap_err();
        assert!(matches!(err.source, ParseError::UnknownBasicCommand(_)));
    }

    #[test]
    fn empty_line_is_rejected() {
        let mut session = Session::new("bot");
        assert!(matches!(
            to_event("", &mut session).unwrap_err().source,
            ParseError::EmptyLine
        ));
    }
}
