/// Sharing the try-on result
///
/// Desktop targets have no native share sheet, so sharing always takes the
/// fallback path: copy the studio link to the clipboard.

use iced::Task;

use crate::notice::Notice;

/// Copy `link` to the clipboard. Returns the clipboard task and the
/// notice to show.
pub fn share_link<M: Send + 'static>(link: &str) -> (Task<M>, Notice) {
    tracing::info!(%link, "no native share sheet, copying share link");
    (iced::clipboard::write(link.to_string()), copied_notice())
}

fn copied_notice() -> Notice {
    Notice::success("Link copied!", "Share link copied to clipboard.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copied_notice() {
        let notice = copied_notice();
        assert_eq!(notice.title, "Link copied!");
        assert!(!notice.is_error());
    }
}
