//! Plain-text rendering of DICT responses.

use std::fmt::Write as _;

use dictwire::{
    DatabasesResponse, DefineResponse, HelpResponse, InfoResponse, MatchResponse, Reply,
    StrategiesResponse,
};

pub(crate) fn define(response: &DefineResponse) -> String {
    if !response.is_ok() {
        return format!("No definitions found ({})\n", response.status.message_text());
    }

    let mut out = String::new();
    for (index, definition) in response.definitions.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "From {} [{}]:\n",
            definition.database_description, definition.database
        );
        out.push_str(&definition.text);
        out.push('\n');
    }
    out
}

pub(crate) fn matches(response: &MatchResponse) -> String {
    if !response.is_ok() {
        return format!("No matches found ({})\n", response.status.message_text());
    }

    let mut out = String::new();
    for entry in &response.matches {
        let _ = writeln!(out, "{}: {}", entry.database, entry.word);
    }
    out
}

pub(crate) fn databases(response: &DatabasesResponse) -> String {
    let rows: Vec<(&str, &str)> = response
        .databases
        .iter()
        .map(|db| (db.name.as_str(), db.description.as_str()))
        .collect();
    table(&rows)
}

pub(crate) fn strategies(response: &StrategiesResponse) -> String {
    let rows: Vec<(&str, &str)> = response
        .strategies
        .iter()
        .map(|s| (s.name.as_str(), s.description.as_str()))
        .collect();
    table(&rows)
}

pub(crate) fn info(response: &InfoResponse) -> String {
    response.info.as_ref().map_or_else(
        || format!("No information ({})\n", response.status.message_text()),
        |text| format!("{text}\n"),
    )
}

pub(crate) fn help(response: &HelpResponse) -> String {
    format!("{}\n", response.text)
}

pub(crate) fn reply(reply: &Reply) -> String {
    format!("{} {}\n", reply.code, reply.message)
}

/// Left-aligns names in a column wide enough for the longest one.
fn table(rows: &[(&str, &str)]) -> String {
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (name, description) in rows {
        let _ = writeln!(out, "{name:<width$}  {description}");
    }
    out
}

#[cfg(test)]
mod tests {
    use dictwire::{DatabaseInfo, Definition, MatchEntry, ReplyCode, StatusReply};

    use super::*;

    fn status(code: u16, success: u16, message: &str) -> StatusReply {
        StatusReply::new(
            Some(ReplyCode::new(code)),
            ReplyCode::new(success),
            Some(message.to_string()),
        )
    }

    #[test]
    fn test_define_output() {
        let response = DefineResponse {
            status: status(150, 150, "2 definitions retrieved"),
            count: 2,
            definitions: vec![
                Definition {
                    headword: "lexicon".to_string(),
                    database: "wn".to_string(),
                    database_description: "WordNet".to_string(),
                    text: "lexicon\n  n 1: a wordbook".to_string(),
                },
                Definition {
                    headword: "lexicon".to_string(),
                    database: "foldoc".to_string(),
                    database_description: "FOLDOC".to_string(),
                    text: "lexicon".to_string(),
                },
            ],
            final_status: Some(status(250, 250, "ok")),
        };

        assert_eq!(
            define(&response),
            "From WordNet [wn]:\n\nlexicon\n  n 1: a wordbook\n\nFrom FOLDOC [foldoc]:\n\nlexicon\n"
        );
    }

    #[test]
    fn test_define_no_match() {
        let response = DefineResponse {
            status: status(552, 150, "no match"),
            count: 0,
            definitions: Vec::new(),
            final_status: None,
        };
        assert_eq!(define(&response), "No definitions found (no match)\n");
    }

    #[test]
    fn test_matches_output() {
        let response = MatchResponse {
            status: status(152, 152, "1 matches found"),
            count: 1,
            matches: vec![MatchEntry {
                database: "wn".to_string(),
                word: "lexical".to_string(),
            }],
            final_status: Some(status(250, 250, "ok")),
        };
        assert_eq!(matches(&response), "wn: lexical\n");
    }

    #[test]
    fn test_databases_table() {
        let response = DatabasesResponse {
            status: status(110, 110, "2 databases present"),
            databases: vec![
                DatabaseInfo {
                    name: "wn".to_string(),
                    description: "WordNet".to_string(),
                },
                DatabaseInfo {
                    name: "foldoc".to_string(),
                    description: "FOLDOC".to_string(),
                },
            ],
            final_status: status(250, 250, "ok"),
        };
        assert_eq!(databases(&response), "wn      WordNet\nfoldoc  FOLDOC\n");
    }

    #[test]
    fn test_reply_line() {
        let reply = Reply::new(ReplyCode::STATUS, ReplyCode::STATUS, "status ok");
        assert_eq!(super::reply(&reply), "210 status ok\n");
    }
}
