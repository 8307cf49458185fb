use anyhow::{Context, bail};
use clap::Parser;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Mint an HS256 session token accepted by session-gate.
///
/// Intended for local testing:
/// - Builds the claims (userId, iat, exp, plus any --claim key=value pairs)
/// - Signs them with the shared secret (same value as the server's JWT_SECRET)
/// - Outputs the token, and optionally ready-to-paste cookie / header lines
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject (user id). Default: random UUID v4.
    #[arg(long)]
    user_id: Option<String>,

    /// Shared HS256 secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: String,

    /// Lifetime in seconds. Negative values produce an already-expired token.
    #[arg(long, default_value_t = 3600, allow_hyphen_values = true)]
    ttl_seconds: i64,

    /// Override iat (unix seconds). Default: now.
    #[arg(long)]
    iat: Option<i64>,

    /// Extra claim as key=value (value parsed as JSON, falling back to a string). Repeatable.
    #[arg(long = "claim", value_name = "KEY=VALUE")]
    claims: Vec<String>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn parse_claim(raw: &str) -> anyhow::Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("claim {raw:?} must look like key=value"))?;

    let key = key.trim();
    if key.is_empty() {
        bail!("claim {raw:?} has an empty key");
    }
    if matches!(key, "userId" | "iat" | "exp") {
        bail!("claim {key:?} is set by dedicated flags");
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn build_claims(user_id: &str, iat: i64, ttl_seconds: i64, extra: Vec<(String, Value)>) -> Value {
    let mut claims = Map::new();
    for (key, value) in extra {
        claims.insert(key, value);
    }
    claims.insert("userId".into(), json!(user_id));
    claims.insert("iat".into(), json!(iat));
    // exp is unsigned on the server side
    claims.insert("exp".into(), json!((iat + ttl_seconds).max(0)));
    Value::Object(claims)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.secret.is_empty() {
        bail!("secret must not be empty");
    }

    let user_id = args
        .user_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let iat = args.iat.unwrap_or_else(|| chrono::Utc::now().timestamp());

    let extra = args
        .claims
        .iter()
        .map(|raw| parse_claim(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let claims = build_claims(&user_id, iat, args.ttl_seconds, extra);

    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(args.secret.as_bytes()),
    )
    .context("failed to sign token")?;

    if args.quiet {
        println!("{token}");
        return Ok(());
    }

    println!("token:  {token}");
    println!("userId: {user_id}");
    println!("exp:    {}", claims["exp"]);
    println!();
    println!("Cookie: token={token}");
    println!("Authorization: Bearer {token}");

    Ok(())
}
