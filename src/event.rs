//! The parser's output data model: [`Event`], [`EventKind`], and the small
//! [`UserRecord`] shape shared by `sender`/`target`. See spec §3.

use chrono::Utc;

/// Whether a sender/target is an ordinary user or one the
/// [`crate::sender`] classifier has flagged as server/services/staff/bot
/// infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SenderClass {
    #[default]
    Anyone,
    Special,
}

/// The `sender`/`target` shape of spec §3: nickname, ident, address,
/// account, and classification. All fields are owned, since events outlive
/// the line they were parsed from only as values, not borrows (spec §3:
/// "event records are short-lived").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserRecord {
    pub nickname: String,
    pub ident: String,
    pub address: String,
    pub account: String,
    pub class: SenderClass,
}

impl UserRecord {
    pub fn is_empty(&self) -> bool {
        self.nickname.is_empty() && self.ident.is_empty() && self.address.is_empty()
    }
}

/// The closed enumeration of event kinds. Covers the RFC 1459/2812 +
/// IRCv3 numerics, the named commands the dispatcher recognises, and the
/// self-variants produced when the sender is the client itself.
///
/// This is necessarily a representative subset rather than an exhaustive
/// enumeration of every numeric any daemon in the wild has ever reused —
/// see spec §9's Open Questions ("do not invent overlays"): numerics with
/// no known mapping resolve to [`EventKind::Numeric`], not to a fabricated
/// variant. One further simplification from a literal closed sum type: a
/// CTCP verb outside the known `ACTION` case cannot be a static variant
/// (the verb string is attacker-controlled data, not a fixed vocabulary);
/// [`EventKind::CtcpOther`] carries the "this is some other CTCP query"
/// kind, and the verb itself is recovered from `Event::aux`, matching the
/// dispatcher contract in spec §4.6 ("aux = X").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum EventKind {
    /// Table default / "nothing parsed yet".
    Unset,
    /// A numeric whose table slot has no specialcase mapping.
    Numeric,

    // -- named commands --
    Join,
    Part,
    Nick,
    Quit,
    Kick,
    Invite,
    Topic,
    ChannelMode,
    UserMode,
    Away,
    Back,
    Cap,
    Account,
    Chghost,
    Ping,
    Pong,
    Error,
    Hello,
    Setname,
    Batch,
    Tagmsg,
    Wallops,
    Authenticate,
    Notice,

    // -- messaging classification (from PRIVMSG/NOTICE) --
    Chan,
    Query,
    Emote,
    CtcpOther,

    // -- self-variants --
    SelfJoin,
    SelfPart,
    SelfNick,
    SelfQuit,
    SelfKick,
    SelfMode,
    SelfChan,
    SelfQuery,
    SelfEmote,

    // -- NOTICE re-entrant promotions (spec §4.6) --
    AuthChallenge,
    AuthFailure,

    // -- Twitch TMI specialcases (spec §8 scenario 3) --
    TwitchHostStart,
    TwitchHostEnd,
    TwitchUserState,
    TwitchRoomState,
    TwitchClearChat,
    TwitchReconnect,
    TwitchGlobalUserState,

    // -- RFC 1459/2812 connection registration (000-099) --
    RplWelcome,
    RplYourhost,
    RplCreated,
    RplMyinfo,
    RplIsupport,

    // -- RFC 1459/2812 command replies (200-399) --
    RplStatslinkinfo,
    RplStatscommands,
    RplEndofstats,
    RplUmodeis,
    RplServlist,
    RplServlistend,
    RplStatsuptime,
    RplLuserclient,
    RplLuserop,
    RplLuserunknown,
    RplLuserchannels,
    RplLuserme,
    RplAdminme,
    RplAdminloc1,
    RplAdminloc2,
    RplAdminemail,
    RplTryagain,
    RplLocalusers,
    RplGlobalusers,
    RplWhoiscertfp,
    RplAway,
    RplUserhost,
    RplIson,
    RplUnaway,
    RplNowaway,
    RplWhoisuser,
    RplWhoisserver,
    RplWhoisoperator,
    RplWhowasuser,
    RplEndofwho,
    RplWhoisidle,
    RplEndofwhois,
    RplWhoischannels,
    RplWhoisspecial,
    RplListstart,
    RplList,
    RplListend,
    RplChannelmodeis,
    RplCreationtime,
    RplWhoisaccount,
    RplNotopic,
    RplTopic,
    RplTopicwhotime,
    RplWhoisactually,
    RplInviting,
    RplInvitelist,
    RplEndofinvitelist,
    RplExceptlist,
    RplEndofexceptlist,
    RplVersion,
    RplWhoreply,
    RplNamreply,
    RplLinks,
    RplEndoflinks,
    RplEndofnames,
    RplBanlist,
    RplEndofbanlist,
    RplEndofwhowas,
    RplInfo,
    RplMotd,
    RplEndofinfo,
    RplMotdstart,
    RplEndofmotd,
    RplWhoishost,
    RplWhoismodes,
    RplYoureoper,
    RplRehashing,
    RplTime,
    RplVisiblehost,
    RplQuietlist,
    RplEndofquietlist,

    // -- RFC 1459/2812 error replies (400-599) --
    ErrNosuchnick,
    ErrNosuchserver,
    ErrNosuchchannel,
    ErrCannotsendtochan,
    ErrToomanychannels,
    ErrWasnosuchnick,
    ErrToomanytargets,
    ErrNosuchservice,
    ErrNoorigin,
    ErrNorecipient,
    ErrNotexttosend,
    ErrNotoplevel,
    ErrWildtoplevel,
    ErrBadmask,
    ErrUnknowncommand,
    ErrNomotd,
    ErrNoadmininfo,
    ErrNonicknamegiven,
    ErrErroneusnickname,
    ErrNicknameinuse,
    ErrNickcollision,
    ErrUsernotinchannel,
    ErrNotonchannel,
    ErrUseronchannel,
    ErrNologin,
    ErrSummondisabled,
    ErrUsersdisabled,
    ErrNotregistered,
    ErrNeedmoreparams,
    ErrAlreadyregistered,
    ErrNopermforhost,
    ErrPasswdmismatch,
    ErrYourebannedcreep,
    ErrKeyset,
    ErrChannelisfull,
    ErrUnknownmode,
    ErrInviteonlychan,
    ErrBannedfromchan,
    ErrBadchannelkey,
    ErrBadchanmask,
    ErrNochanmodes,
    ErrBanlistfull,
    ErrNoprivileges,
    ErrChanoprivsneeded,
    ErrCantkillserver,
    ErrRestricted,
    ErrUniqoprivsneeded,
    ErrNooperhost,
    ErrUmodeunknownflag,
    ErrUsersdontmatch,
    ErrNeedpong,
    ErrStarttls,

    // -- SASL / IRCv3 account replies (900-908) --
    RplLoggedin,
    RplLoggedout,
    ErrNicklocked,
    RplSaslsuccess,
    ErrSaslfail,
    ErrSasltoolong,
    ErrSaslaborted,
    ErrSaslalready,
    RplSaslmechs,
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::Unset
    }
}

impl EventKind {
    /// Resolve a named (non-numeric) command token to its event kind, by
    /// exact case-insensitive string match. `None` for anything unrecognised
    /// — the caller raises [`crate::error::ParseError::UnknownNamedCommand`]
    /// or `UnknownBasicCommand`, per the prefixed/unprefixed distinction in
    /// spec §6.
    pub fn from_command_name(name: &str) -> Option<EventKind> {
        Some(match name.to_ascii_uppercase().as_str() {
            "JOIN" => EventKind::Join,
            "PART" => EventKind::Part,
            "NICK" => EventKind::Nick,
            "QUIT" => EventKind::Quit,
            "KICK" => EventKind::Kick,
            "INVITE" => EventKind::Invite,
            "TOPIC" => EventKind::Topic,
            "MODE" => EventKind::ChannelMode,
            "AWAY" => EventKind::Away,
            "CAP" => EventKind::Cap,
            "ACCOUNT" => EventKind::Account,
            "CHGHOST" => EventKind::Chghost,
            "PING" => EventKind::Ping,
            "PONG" => EventKind::Pong,
            "ERROR" => EventKind::Error,
            "HELLO" => EventKind::Hello,
            "SETNAME" => EventKind::Setname,
            "BATCH" => EventKind::Batch,
            "TAGMSG" => EventKind::Tagmsg,
            "WALLOPS" => EventKind::Wallops,
            "AUTHENTICATE" => EventKind::Authenticate,
            "PRIVMSG" => EventKind::Chan, // refined by the dispatcher
            "NOTICE" => EventKind::Notice,
            "HOSTTARGET" => EventKind::TwitchHostStart, // refined by content
            "USERSTATE" => EventKind::TwitchUserState,
            "ROOMSTATE" => EventKind::TwitchRoomState,
            "CLEARCHAT" => EventKind::TwitchClearChat,
            "RECONNECT" => EventKind::TwitchReconnect,
            "GLOBALUSERSTATE" => EventKind::TwitchGlobalUserState,
            _ => return None,
        })
    }
}

/// One parsed inbound line, per spec §3.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub raw: String,
    pub tags: Vec<(String, String)>,
    pub kind: EventKind,
    pub num: u16,
    pub sender: UserRecord,
    pub target: UserRecord,
    pub channel: String,
    pub content: String,
    pub aux: String,
    pub count: i64,
    pub time: i64,
    pub errors: Vec<String>,
}

impl Event {
    /// A fresh event with `time` stamped to the current wall clock and
    /// everything else empty/default, per spec §3's `time` = "ingestion
    /// wall-clock epoch seconds".
    pub fn new(raw: impl Into<String>) -> Event {
        Event {
            raw: raw.into(),
            kind: EventKind::Unset,
            time: Utc::now().timestamp(),
            ..Default::default()
        }
    }
}
