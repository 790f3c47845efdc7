//! Text Module
//!
//! セル文字列の正規化（列キー化、キャメルケース化、カンマ区切りの分割）を提供するモジュール。

/// 見出し文字列を列キーに正規化する
///
/// 小文字化し、空白とアンダースコアを取り除きます。
/// スロット名から値の列キーを求める場合にも同じ規則を使用します。
///
/// 例: `"LIST_OF_ROOMS"` -> `"listofrooms"`, `"Alternate Spelling"` -> `"alternatespelling"`
pub(crate) fn column_key(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// 単語の一部として扱い、区切りにしない文字
const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// 文字列を単語に分割する
///
/// アポストロフィを取り除いた上で、英数字以外の文字を区切りとし、
/// さらに次の位置で単語を区切ります。
///
/// - 小文字から大文字への切り替わり（`roomName` -> `room`, `Name`）
/// - 連続した大文字の末尾（`XMLHttp` -> `XML`, `Http`）
/// - 文字と数字の切り替わり（`slot2b` -> `slot`, `2`, `b`）
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input
        .chars()
        .filter(|c| !APOSTROPHES.contains(c))
        .collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        let boundary = match current.chars().last() {
            None => false,
            Some(prev) => {
                (prev.is_lowercase() && ch.is_uppercase())
                    || (prev.is_alphabetic() && ch.is_numeric())
                    || (prev.is_numeric() && ch.is_alphabetic())
                    || (prev.is_uppercase()
                        && ch.is_uppercase()
                        && chars.get(idx + 1).is_some_and(|next| next.is_lowercase()))
            }
        };

        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// 文字列をキャメルケースに変換する
///
/// 先頭の単語はすべて小文字、以降の単語は先頭のみ大文字にします。
///
/// 例: `"Start Time"` -> `"startTime"`, `"AMAZON.NUMBER"` -> `"amazonNumber"`
pub(crate) fn camel_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for (idx, word) in split_words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if idx == 0 {
            result.push_str(&lower);
            continue;
        }

        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    result
}

/// カンマ区切りの文字列を分割する
///
/// 各要素はトリムされ、空の要素は取り除かれます。
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
