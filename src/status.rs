//! `git status --porcelain=v1` の出力をファイル状態の一覧へ変換する。

/// 未追跡ファイルを表すステータスコード。
const UNTRACKED: &str = "??";
/// リネーム表記の区切り。
const RENAME_ARROW: &str = " -> ";

/// 1ファイル分の状態。一覧は毎回作り直すため、同一性はパスで判定する。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStatusRecord {
    /// リポジトリ相対パス。
    pub path: String,
    /// インデックスに変更が載っているか。
    pub staged: bool,
}

/// ステータス出力全体を解析する。短すぎる行は読み飛ばす。
pub fn parse_status_report(report: &str) -> Vec<FileStatusRecord> {
    report.lines().filter_map(parse_line).collect()
}

/// 1行（`XY path` または `XY old -> new`）を解析する。
fn parse_line(line: &str) -> Option<FileStatusRecord> {
    // コード2文字 + 区切り1文字 + パス1文字以上が必要。
    if line.len() < 4 {
        return None;
    }
    let code = line.get(..2)?;
    let raw = line.get(3..)?.trim();
    if raw.is_empty() {
        return None;
    }

    // リネームは新しいパスだけを残す。
    let raw = match raw.split_once(RENAME_ARROW) {
        Some((_, new)) => new,
        None => raw,
    };
    let path = unquote(raw);

    // X列（インデックス側）が空白でなければステージ済み。
    let staged = code != UNTRACKED && !code.starts_with(' ');

    Some(FileStatusRecord { path, staged })
}

/// git が C 形式でクォートしたパスを元に戻す。
fn unquote(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
    else {
        return raw.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('a') => bytes.push(0x07),
            Some('b') => bytes.push(0x08),
            Some('f') => bytes.push(0x0c),
            Some('n') => bytes.push(b'\n'),
            Some('r') => bytes.push(b'\r'),
            Some('t') => bytes.push(b'\t'),
            Some('v') => bytes.push(0x0b),
            Some('"') => bytes.push(b'"'),
            Some('\\') => bytes.push(b'\\'),
            Some(d @ '0'..='7') => {
                // 非ASCIIは3桁の8進数でバイト単位に出力される。
                let mut digits = String::from(d);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(&c @ '0'..='7') => {
                            digits.push(c);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                // 1バイトに収まらない値は解釈せずそのまま残す。
                match u8::from_str_radix(&digits, 8) {
                    Ok(byte) => bytes.push(byte),
                    Err(_) => {
                        bytes.push(b'\\');
                        bytes.extend_from_slice(digits.as_bytes());
                    }
                }
            }
            Some(other) => {
                bytes.push(b'\\');
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(path: &str, staged: bool) -> FileStatusRecord {
        FileStatusRecord {
            path: path.into(),
            staged,
        }
    }

    #[test]
    fn test_modified_and_untracked() {
        // インデックス済みの変更と未追跡ファイルを区別する。
        let files = parse_status_report("M  a.txt\n?? b.txt\n");
        assert_eq!(files, vec![rec("a.txt", true), rec("b.txt", false)]);
    }

    #[test]
    fn test_rename_keeps_new_path() {
        let files = parse_status_report("R  old.txt -> new.txt\n");
        assert_eq!(files, vec![rec("new.txt", true)]);
    }

    #[test]
    fn test_worktree_only_change_is_unstaged() {
        let files = parse_status_report(" M src/lib.rs\n D gone.rs\n");
        assert_eq!(files, vec![rec("src/lib.rs", false), rec("gone.rs", false)]);
    }

    #[test]
    fn test_both_columns_set_counts_as_staged() {
        // MM は一部ステージ済みなので staged 扱い。
        let files = parse_status_report("MM both.rs\nAM added.rs\n");
        assert_eq!(files, vec![rec("both.rs", true), rec("added.rs", true)]);
    }

    #[test]
    fn test_short_and_blank_lines_are_skipped() {
        let files = parse_status_report("\n??\nM \nA  ok.rs\n\n");
        assert_eq!(files, vec![rec("ok.rs", true)]);
    }

    #[test]
    fn test_empty_report() {
        assert!(parse_status_report("").is_empty());
    }

    #[test]
    fn test_record_count_matches_viable_lines() {
        let report = "?? a\n M b\nM  c\nD  d\nR  e -> f\n";
        let files = parse_status_report(report);
        assert_eq!(files.len(), report.lines().count());
        // 未追跡は常に unstaged、それ以外は X 列で判定する。
        for (line, file) in report.lines().zip(&files) {
            let code = &line[..2];
            let expected = code != "??" && !code.starts_with(' ');
            assert_eq!(file.staged, expected, "line {line:?}");
        }
    }

    #[test]
    fn test_quoted_paths_are_unquoted() {
        let files = parse_status_report(
            "?? \"with space\\t.txt\"\nR  \"a b\" -> \"caf\\303\\251.md\"\n",
        );
        assert_eq!(
            files,
            vec![rec("with space\t.txt", false), rec("café.md", true)]
        );
    }

    #[test]
    fn test_control_character_escapes_are_decoded() {
        let files = parse_status_report(
            "?? \"a\\rb\"\n?? \"\\a\\b\\f\\v\"\n?? \"q\\\"\\\\.txt\"\n",
        );
        assert_eq!(
            files,
            vec![
                rec("a\rb", false),
                rec("\u{7}\u{8}\u{c}\u{b}", false),
                rec("q\"\\.txt", false),
            ]
        );
    }

    #[test]
    fn test_octal_escape_above_byte_range_is_kept_literally() {
        // \777 は1バイトに収まらない。
        let files = parse_status_report("?? \"x\\777y\"\n");
        assert_eq!(files, vec![rec("x\\777y", false)]);
    }

    #[test]
    fn test_non_ascii_prefix_does_not_panic() {
        // 壊れた行でもスライスで落ちないこと。
        let files = parse_status_report("é x.txt\n");
        assert!(files.len() <= 1);
    }
}
