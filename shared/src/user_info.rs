use serde::{Serialize, Deserialize};
use std::net::IpAddr;

/// Shared by every client whose address cannot be determined.
pub const UNKNOWN_IP: &str = "0.0.0.0";

/// Identity used to deduplicate votes: the client's network address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterInfo {
    pub ip: String,
}

/// Picks the voter address from proxy headers first, then the socket peer.
pub fn resolve_voter_ip(real_ip: Option<&str>, forwarded_for: Option<&str>, remote: Option<IpAddr>) -> String {
    let from_header = |value: Option<&str>| {
        value
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    from_header(real_ip)
        .or_else(|| from_header(forwarded_for))
        .or_else(|| remote.map(|ip| ip.to_string()))
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

// Backend-specific Rocket implementation
#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::request::{FromRequest, Outcome};
    use rocket::Request;

    #[rocket::async_trait]
    impl<'r> FromRequest<'r> for VoterInfo {
        type Error = ();

        async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
            let headers = req.headers();
            let ip = resolve_voter_ip(
                headers.get_one("X-Real-IP"),
                headers.get_one("X-Forwarded-For"),
                req.remote().map(|addr| addr.ip()),
            );

            Outcome::Success(VoterInfo { ip })
        }
    }
}
