pub mod report;
pub mod room;

/// Splits text into `;`-terminated statements. `#` starts a comment.
pub(crate) fn statements(text: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        let line = match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        };
        for token in line.split_whitespace() {
            if token == ";" {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            } else if let Some(stripped) = token.strip_suffix(';') {
                if !stripped.is_empty() {
                    current.push(stripped);
                }
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            } else {
                current.push(token);
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Reads `( x y )` groups from a token slice.
pub(crate) fn points(tokens: &[&str]) -> anyhow::Result<Vec<crate::geom::point::Point>> {
    use crate::geom::point::Point;

    let mut out = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] != "(" {
            anyhow::bail!("expected '(' but found '{}'", tokens[i]);
        }
        if i + 3 >= tokens.len() || tokens[i + 3] != ")" {
            anyhow::bail!("unterminated coordinate group near '{}'", tokens[i]);
        }
        let x: i64 = tokens[i + 1].parse()?;
        let y: i64 = tokens[i + 2].parse()?;
        out.push(Point::new(x, y));
        i += 4;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point::Point;

    #[test]
    fn splits_statements_across_lines() {
        let stmts = statements("SHELL ( 0 0 )\n ( 1 0 ) ( 1 1 ) ; # trailing\nENTRY ( 0 0 );");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0][0], "SHELL");
        assert_eq!(stmts[1], vec!["ENTRY", "(", "0", "0", ")"]);
    }

    #[test]
    fn reads_points() {
        let pts = points(&["(", "3", "-4", ")", "(", "5", "6", ")"]).unwrap();
        assert_eq!(pts, vec![Point::new(3, -4), Point::new(5, 6)]);
        assert!(points(&["(", "3", ")"]).is_err());
        assert!(points(&["3", "4"]).is_err());
    }
}
