//! Mock database REPL binary for integration testing
//!
//! Implements the child program's observable text protocol without any of
//! its storage machinery: `db > ` prompt before every read, insert/select
//! plus the `.exit` meta command, the exact error lines, a 1400-row
//! capacity, and tab-separated persistence to the fixture file given as
//! the single argument. Stdout is flushed before every read and before
//! any stderr write, so captures are deterministic.

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const USERNAME_MAX: usize = 32;
const EMAIL_MAX: usize = 255;
const TABLE_CAPACITY: usize = 1400;

fn main() {
    let path = match std::env::args_os().nth(1) {
        Some(p) => PathBuf::from(p),
        None => {
            println!("Must supply a database filename.");
            std::process::exit(1);
        }
    };

    let mut table = Table::load(&path);

    let stdin = std::io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    loop {
        write!(out, "db > ").ok();
        out.flush().ok();

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                out.flush().ok();
                eprintln!("read_input: unexpected end of input");
                std::process::exit(1);
            }
            Ok(_) => {}
            Err(_) => {
                out.flush().ok();
                eprintln!("read_input: read failure");
                std::process::exit(1);
            }
        }
        let input = line.trim_end_matches('\n');

        if let Some(meta) = input.strip_prefix('.') {
            if meta == "exit" {
                table.save(&path);
                out.flush().ok();
                std::process::exit(0);
            }
            writeln!(out, "Unrecognized command '{}'.", input).ok();
            continue;
        }

        if input.starts_with("insert") {
            match parse_insert(input) {
                Ok(row) => table.insert(row, &mut out),
                Err(ParseError::Syntax) => {
                    writeln!(out, "Syntax error. Could not parse statement.").ok();
                    writeln!(out, "Usage: insert id name email").ok();
                }
                Err(ParseError::NegativeId) => {
                    writeln!(out, "Error: id must be positive.").ok();
                }
                Err(ParseError::StringOverflow) => {
                    writeln!(out, "Error: string is too long.").ok();
                }
            }
            continue;
        }

        if input == "select" {
            for (id, (username, email)) in &table.rows {
                writeln!(out, "({}, {}, {})", id, username, email).ok();
            }
            writeln!(out, "Executed.").ok();
            continue;
        }

        writeln!(out, "Unrecognized keyword at start of '{}'.", input).ok();
    }
}

enum ParseError {
    Syntax,
    NegativeId,
    StringOverflow,
}

struct Row {
    id: u32,
    username: String,
    email: String,
}

/// Parse `insert <id> <username> <email>` the way the real parser does:
/// atoi-style id (trailing garbage ignored, unparsable means 0), then
/// length-checked strings, each check in token order.
fn parse_insert(input: &str) -> Result<Row, ParseError> {
    let mut tokens = input.split_whitespace().skip(1);

    let id = atoi(tokens.next().ok_or(ParseError::Syntax)?);
    if id < 0 {
        return Err(ParseError::NegativeId);
    }

    let username = tokens.next().ok_or(ParseError::Syntax)?;
    if username.len() > USERNAME_MAX {
        return Err(ParseError::StringOverflow);
    }

    let email = tokens.next().ok_or(ParseError::Syntax)?;
    if email.len() > EMAIL_MAX {
        return Err(ParseError::StringOverflow);
    }

    Ok(Row {
        id: id as u32,
        username: username.to_string(),
        email: email.to_string(),
    })
}

/// C `atoi`: optional sign, leading digits, anything else stops the scan
fn atoi(s: &str) -> i64 {
    let t = s.trim_start();
    let (negative, rest) = match t.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let value: i64 = digits.parse().unwrap_or(0);
    if negative {
        -value
    } else {
        value
    }
}

/// In-memory table, key-ordered like the real b-tree
struct Table {
    rows: BTreeMap<u32, (String, String)>,
}

impl Table {
    fn load(path: &Path) -> Self {
        let mut rows = BTreeMap::new();
        if let Ok(content) = std::fs::read_to_string(path) {
            for line in content.lines() {
                let mut fields = line.split('\t');
                if let (Some(id), Some(username), Some(email)) =
                    (fields.next(), fields.next(), fields.next())
                {
                    if let Ok(id) = id.parse::<u32>() {
                        rows.insert(id, (username.to_string(), email.to_string()));
                    }
                }
            }
        }
        Self { rows }
    }

    fn save(&self, path: &Path) {
        let mut content = String::new();
        for (id, (username, email)) in &self.rows {
            content.push_str(&format!("{}\t{}\t{}\n", id, username, email));
        }
        std::fs::write(path, content).ok();
    }

    fn insert<W: Write>(&mut self, row: Row, out: &mut W) {
        // Duplicate wins over capacity, matching the real check order.
        if self.rows.contains_key(&row.id) {
            writeln!(out, "Error: duplicate key.").ok();
            return;
        }
        if self.rows.len() >= TABLE_CAPACITY {
            writeln!(out, "Need to implement splitting a leaf node.").ok();
            return;
        }
        self.rows.insert(row.id, (row.username, row.email));
        writeln!(out, "Executed.").ok();
    }
}
