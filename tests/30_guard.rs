mod common;

use anyhow::Result;
use reqwest::header::COOKIE;
use reqwest::StatusCode;

#[tokio::test]
async fn orders_without_cookie_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/orders?email=driver@example.com", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/orders?email=driver@example.com", server.base_url))
        .header(COOKIE, "access_token=not-a-jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn cleared_cookie_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // What a client sends after honoring the logout Set-Cookie
    let res = client
        .get(format!("{}/orders?email=driver@example.com", server.base_url))
        .header(COOKIE, "access_token=")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn expired_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::mint_token("driver@example.com", -3600);
    let res = client
        .get(format!("{}/orders?email=driver@example.com", server.base_url))
        .header(COOKIE, format!("access_token={}", token))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn mismatched_email_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Valid credential for one identity querying another's orders
    let token = common::mint_token("driver@example.com", 3600);
    let res = client
        .get(format!("{}/orders?email=other@example.com", server.base_url))
        .header(COOKIE, format!("access_token={}", token))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn matching_email_passes_the_guard() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::mint_token("driver@example.com", 3600);
    let res = client
        .get(format!("{}/orders?email=driver@example.com", server.base_url))
        .header(COOKIE, format!("access_token={}", token))
        .send()
        .await?;

    // The guard admits the request; the outcome then depends on the
    // database being reachable, which this test does not require.
    assert_ne!(res.status(), StatusCode::UNAUTHORIZED);

    if res.status() == StatusCode::OK {
        let body = res.json::<serde_json::Value>().await?;
        let orders = body.as_array().expect("expected an array of orders");
        for order in orders {
            assert_eq!(order["email"], "driver@example.com");
        }
    }
    Ok(())
}

#[tokio::test]
async fn issued_cookie_round_trips_through_the_guard() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/jwt", server.base_url))
        .json(&serde_json::json!({ "email": "driver@example.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("missing Set-Cookie header")
        .to_str()?
        .to_string();
    // "access_token=<jwt>; Path=/; ..." -> "access_token=<jwt>"
    let pair = set_cookie.split(';').next().expect("empty cookie").to_string();

    let res = client
        .get(format!("{}/orders?email=driver@example.com", server.base_url))
        .header(COOKIE, pair)
        .send()
        .await?;

    assert_ne!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
