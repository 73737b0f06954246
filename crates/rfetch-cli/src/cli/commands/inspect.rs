//! `rfetch inspect` – show how an identifier parses.

use anyhow::Result;
use rfetch_core::view::Request;

pub fn run_inspect(url: &str, json: bool) -> Result<()> {
    let request = Request::parse(url)?;
    if json {
        let mut value = serde_json::to_value(&request.url)?;
        value["view_source"] = serde_json::Value::Bool(request.view_source);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", describe(&request));
    }
    Ok(())
}

/// One `key: value` line per identifier field.
pub fn describe(request: &Request) -> String {
    let url = &request.url;
    let mut out = format!("scheme: {}\n", url.scheme());
    if let Some(host) = url.host() {
        out.push_str(&format!("host: {}\n", host));
    }
    if let Some(port) = url.port() {
        out.push_str(&format!("port: {}\n", port));
    }
    match url.data() {
        Some(payload) => {
            out.push_str(&format!("media type: {}\n", payload.media_type));
            out.push_str(&format!("payload: {}\n", payload.data));
        }
        None => out.push_str(&format!("path: {:?}\n", url.path_segments())),
    }
    if request.view_source {
        out.push_str("view source: yes\n");
    }
    out
}
