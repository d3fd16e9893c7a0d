use crate::common::{INDEX_HTML, open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::buffers::edit_buffer::EditBuffer;
use archedit::artifacts::checkout::checkout::CheckoutMode;
use archedit::artifacts::tree::tree_node::TreeNode;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn numeric_qualifier_opens_historical_version(#[future] site: MemoryArchiveService) {
    let (session, _notifications) = open_session(&site.await, "dat://X+3").await;

    assert_eq!(session.checkout().mode(), &CheckoutMode::Historical(3));
    assert!(session.checkout().is_historical());
    assert_eq!(session.checkout().version_label(), "3");

    let paths = session
        .tree()
        .root()
        .walk()
        .map(TreeNode::path)
        .collect::<Vec<_>>();
    assert_eq!(paths, vec!["/", "/css", "/css/main.css", "/index.html"]);

    let active = session.buffers().active().map(EditBuffer::content);
    assert_eq!(active, Some(INDEX_HTML));
}

#[rstest]
#[tokio::test]
async fn version_zero_is_the_empty_archive(#[future] site: MemoryArchiveService) {
    let (session, _notifications) = open_session(&site.await, "dat://X+0").await;

    assert_eq!(session.checkout().mode(), &CheckoutMode::Historical(0));
    assert!(session.tree().root().children().is_empty());
    assert!(session.buffers().active().is_none());
}
