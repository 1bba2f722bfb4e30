// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime configuration: environment for where things live, the `settings`
//! table for preferences that travel with the database.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::ledger::LedgerPolicy;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.uangkita", "UangKita", "uangkita"));

pub const DEFAULT_CURRENCY: &str = "IDR";
pub const DEFAULT_LOG_FILTER: &str = "uangkita=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub owner: String,
    pub receipt_endpoint: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let db_path = match env::var_os("UANGKITA_DB") {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => default_db_path()?,
        };
        let owner = env::var("UANGKITA_OWNER")
            .or_else(|_| env::var("USER"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "local".to_string());
        let receipt_endpoint = env::var("UANGKITA_RECEIPT_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            db_path,
            owner,
            receipt_endpoint,
        })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("uangkita.sqlite"))
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Currency new wallets are created in.
pub fn get_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "currency")?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    let code = ccy.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        anyhow::bail!("Invalid currency '{}', expected a three-letter code", ccy.trim());
    }
    set_setting(conn, "currency", &code)
}

pub fn get_policy(conn: &Connection) -> Result<LedgerPolicy> {
    let allow_overdraft = match get_setting(conn, "allow_overdraft")? {
        Some(v) => parse_flag(&v)
            .with_context(|| format!("Invalid allow_overdraft setting '{}'", v))?,
        None => false,
    };
    Ok(LedgerPolicy { allow_overdraft })
}

pub fn set_allow_overdraft(conn: &Connection, allow: bool) -> Result<()> {
    set_setting(conn, "allow_overdraft", if allow { "true" } else { "false" })
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
