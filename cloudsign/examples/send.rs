use std::sync::Arc;

use anyhow::{anyhow, Result};
use bytes::Bytes;
use cloudsign::{Config, Context, OsEnv, ReqwestHttpSend, Signer, SigningHttpSend};

/// Usage: `send <METHOD> <URL>`
///
/// Credentials, region and service are read from `CLOUDSIGN_*` env values.
/// `X-Project-Id` is taken from `CLOUDSIGN_PROJECT_ID` if set.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let method = args.next().ok_or_else(|| anyhow!("missing method"))?;
    let url = args.next().ok_or_else(|| anyhow!("missing url"))?;

    let env_ctx = Context::new().with_env(OsEnv);
    let config = Config::new().from_env(&env_ctx);
    let signer = Signer::from_config(&config)?;
    println!("Signing with {} for {:?}", signer.signing_algorithm(), config);

    // Every request sent through this context is signed first.
    let ctx = env_ctx.with_http_send(SigningHttpSend::new(
        Arc::new(signer),
        ReqwestHttpSend::default(),
    ));

    let mut req = http::Request::builder().method(method.as_str()).uri(url);
    if let Some(project_id) = ctx.env_var("CLOUDSIGN_PROJECT_ID") {
        req = req.header("X-Project-Id", project_id);
    }

    let resp = ctx.http_send_as_string(req.body(Bytes::new())?).await?;
    println!("Response status: {}", resp.status());
    println!("{}", resp.body());

    Ok(())
}
