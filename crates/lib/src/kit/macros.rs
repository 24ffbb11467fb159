//! `%{NAME}` macro substitution.

/// Replace every `%{NAME}` in `input` with `lookup(NAME)`.
///
/// Unknown names and unterminated `%{` sequences are left untouched.
pub fn expand<F>(input: &str, lookup: F) -> String
where
  F: Fn(&str) -> Option<String>,
{
  let mut out = String::with_capacity(input.len());
  let mut rest = input;

  while let Some(start) = rest.find("%{") {
    out.push_str(&rest[..start]);
    let after = &rest[start + 2..];

    let Some(end) = after.find('}') else {
      out.push_str(&rest[start..]);
      return out;
    };

    let name = &after[..end];
    match lookup(name) {
      Some(value) => out.push_str(&value),
      None => out.push_str(&rest[start..start + 2 + end + 1]),
    }
    rest = &after[end + 1..];
  }

  out.push_str(rest);
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lookup(name: &str) -> Option<String> {
    match name {
      "A" => Some("alpha".to_string()),
      "Kit:Name" => Some("desk".to_string()),
      _ => None,
    }
  }

  #[test]
  fn replaces_known_names() {
    assert_eq!(expand("x-%{A}-%{Kit:Name}", lookup), "x-alpha-desk");
  }

  #[test]
  fn keeps_unknown_names() {
    assert_eq!(expand("%{B}/%{A}", lookup), "%{B}/alpha");
  }

  #[test]
  fn keeps_unterminated_sequence() {
    assert_eq!(expand("pre %{A", lookup), "pre %{A");
  }

  #[test]
  fn plain_text_is_unchanged() {
    assert_eq!(expand("no macros 100%", lookup), "no macros 100%");
  }
}
