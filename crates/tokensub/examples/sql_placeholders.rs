//! Rewrites named `#{...}` parameters in a SQL statement into positional `?`
//! placeholders, and inlines `${...}` text substitutions from a fixed table,
//! the way a SQL mapper prepares a statement before handing it to a driver.
//!
//! Run with
//!
//! ```bash
//! cargo run -p tokensub --example sql_placeholders
//! ```

use std::{cell::RefCell, collections::HashMap};

use tokensub::{Delimiters, TokenParser, fallible};

#[derive(Debug, thiserror::Error)]
#[error("no substitution for `{0}`")]
struct MissingSubstitution(String);

fn main() {
    let statement = r"SELECT id, name FROM ${table}
        WHERE owner = #{owner.id} AND name LIKE #{pattern}
        ORDER BY ${order} -- literal: \#{not_a_param}";

    let text_substitutions = HashMap::from([("table", "accounts"), ("order", "name ASC")]);

    // Pass 1: inline text substitutions. These fail loudly on unknown names.
    let inline = TokenParser::new(
        Delimiters::DOLLAR_BRACE,
        fallible(|name: &str| {
            text_substitutions
                .get(name.trim())
                .map(ToString::to_string)
                .ok_or_else(|| MissingSubstitution(name.to_string()))
        }),
    );
    let statement = match inline.parse(statement) {
        Ok(statement) => statement,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    // Pass 2: bind parameters become positional placeholders.
    let params = RefCell::new(Vec::new());
    let bind = TokenParser::new(Delimiters::HASH_BRACE, |name: &str| {
        params.borrow_mut().push(name.trim().to_string());
        "?".to_string()
    });
    let sql = bind.render(statement.as_str());

    println!("{sql}");
    for (i, name) in params.borrow().iter().enumerate() {
        println!("  ?{} <- {name}", i + 1);
    }
}
