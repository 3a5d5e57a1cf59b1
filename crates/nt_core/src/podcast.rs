//! Two-host podcast scripts.
//!
//! A script is plain text where every spoken line starts with `Host A:` or
//! `Host B:`. Anything else (blank lines, stage notes) is ignored when the
//! script is split into segments.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Article;

/// Read out when there is nothing to talk about.
pub const EMPTY_SCRIPT: &str =
    "Host A: Sorry, we couldn't find any news to discuss today. Please check back later!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Host {
    A,
    B,
}

impl Host {
    pub fn tag(&self) -> &'static str {
        match self {
            Host::A => "Host A:",
            Host::B => "Host B:",
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().trim_end_matches(':'))
    }
}

/// One spoken line of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub host: Host,
    pub text: String,
}

pub fn script_lines(script: &str) -> Vec<ScriptLine> {
    script
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            [Host::A, Host::B].into_iter().find_map(|host| {
                line.strip_prefix(host.tag()).map(|text| ScriptLine {
                    host,
                    text: text.trim().to_string(),
                })
            })
        })
        .filter(|line| !line.text.is_empty())
        .collect()
}

/// Both hosts must speak for a script to be usable.
pub fn has_both_hosts(script: &str) -> bool {
    script.contains(Host::A.tag()) && script.contains(Host::B.tag())
}

/// Short canned episode about the first article, used when no generated
/// script is available.
pub fn fallback_script(articles: &[Article]) -> String {
    let topic = articles
        .first()
        .map(|a| a.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or("a recent news topic");
    format!(
        "Host A: Welcome to our news update. We hit a technical hiccup generating our usual in-depth analysis today.\n\
         Host B: Seems our AI hosts are on a brief coffee break. But we can tell you that {} was a significant story today.\n\
         Host A: We will bring you a full, fact-checked report as soon as possible.\n\
         Host B: In the meantime, remember to always critically assess your news sources.\n\
         Host A: More updates soon!",
        topic
    )
}
