//! Prefix parsing: the part of a line between the leading `:` and the first
//! space, per spec §4.4.

/// The parsed shape of a line's prefix: either a user (`nick!user@host`,
/// with `user`/`host` each optional on a partial prefix) or a bare server
/// address.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Prefix<'a> {
    User {
        nick: &'a str,
        user: Option<&'a str>,
        host: Option<&'a str>,
    },
    Server(&'a str),
}

impl<'a> Prefix<'a> {
    /// Parse per spec §4.4's rules:
    /// - contains `!` → split into `nick!user@host` (first `!`, first `@`);
    /// - else contains `.` → a bare server address;
    /// - else → a bare nickname.
    pub fn parse(raw: &'a str) -> Prefix<'a> {
        if let Some(bang) = raw.find('!') {
            let nick = &raw[..bang];
            let rest = &raw[bang + 1..];
            match rest.find('@') {
                Some(at) => Prefix::User {
                    nick,
                    user: Some(&rest[..at]),
                    host: Some(&rest[at + 1..]),
                },
                None => Prefix::User {
                    nick,
                    user: Some(rest),
                    host: None,
                },
            }
        } else if raw.contains('.') {
            Prefix::Server(raw)
        } else {
            Prefix::User {
                nick: raw,
                user: None,
                host: None,
            }
        }
    }

    /// The nickname, if this is a user prefix.
    pub fn nick(&self) -> Option<&'a str> {
        match self {
            Prefix::User { nick, .. } => Some(nick),
            Prefix::Server(_) => None,
        }
    }

    /// The host/address portion, whether from a user prefix's `host` or a
    /// bare server prefix.
    pub fn address(&self) -> Option<&'a str> {
        match self {
            Prefix::User { host, .. } => *host,
            Prefix::Server(addr) => Some(addr),
        }
    }
}
