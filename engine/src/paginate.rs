use crate::server::Document;

/// Slice an already-ranked result list into fixed-size pages, preserving
/// input order. The last page may be shorter; a page size of zero yields no
/// pages. Performs no search logic.
pub fn paginate(documents: &[Document], page_size: usize) -> Vec<Vec<Document>> {
    if page_size == 0 {
        return Vec::new();
    }
    documents
        .chunks(page_size)
        .map(<[Document]>::to_vec)
        .collect()
}
