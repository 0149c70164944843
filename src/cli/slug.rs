//! Slug command: heading text to URL fragment.

use anyhow::Result;

use crate::cli::SlugArgs;
use crate::utils::slug::SlugStyle;

/// Print one slug per input text, in order.
pub fn print_slugs(args: &SlugArgs) -> Result<()> {
    for slug in slugs(args) {
        println!("{slug}");
    }
    Ok(())
}

fn slugs(args: &SlugArgs) -> Vec<String> {
    let style = if args.plain {
        SlugStyle::Plain
    } else {
        SlugStyle::Uri
    };
    args.texts.iter().map(|text| style.apply(text)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs() {
        let args = SlugArgs {
            texts: vec!["  Hello World  ".into(), "認証".into(), String::new()],
            plain: false,
        };
        assert_eq!(slugs(&args), ["hello-world", "%E8%AA%8D%E8%A8%BC", ""]);

        let args = SlugArgs { plain: true, ..args };
        assert_eq!(slugs(&args), ["hello-world", "認証", ""]);
    }
}
