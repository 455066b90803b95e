use std::collections::VecDeque;

use crate::server::{Document, DocumentStatus, SearchServer};
use crate::error::SearchError;
use crate::index::DocId;
use crate::REQUEST_WINDOW_SIZE;

/// Sliding-window statistics over the most recent search calls.
///
/// Wraps a [`SearchServer`] and records, for each search, whether it returned
/// any documents. Only the last [`REQUEST_WINDOW_SIZE`] calls are kept; the
/// oldest entry is evicted on overflow. A query that fails to parse records
/// nothing and propagates the error.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    // true = the call returned at least one document
    window: VecDeque<bool>,
    no_result_count: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self {
            server,
            window: VecDeque::with_capacity(REQUEST_WINDOW_SIZE),
            no_result_count: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        let results = self.server.find_top_documents(raw_query)?;
        self.record(!results.is_empty());
        Ok(results)
    }

    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        let results = self
            .server
            .find_top_documents_with_status(raw_query, status)?;
        self.record(!results.is_empty());
        Ok(results)
    }

    pub fn add_find_request_with_predicate<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, SearchError>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let results = self
            .server
            .find_top_documents_with_predicate(raw_query, predicate)?;
        self.record(!results.is_empty());
        Ok(results)
    }

    /// How many calls currently inside the window returned no documents.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    fn record(&mut self, had_results: bool) {
        if self.window.len() == REQUEST_WINDOW_SIZE {
            if self.window.pop_front() == Some(false) {
                self.no_result_count -= 1;
            }
        }
        self.window.push_back(had_results);
        if !had_results {
            self.no_result_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_with_documents() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("and in at").unwrap();
        server
            .add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        server
            .add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        server
            .add_document(3, "big cat fancy collar", DocumentStatus::Actual, &[1, 2, 8])
            .unwrap();
        server
            .add_document(4, "big dog sparrow Eugene", DocumentStatus::Actual, &[1, 3, 2])
            .unwrap();
        server
            .add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Actual, &[1, 1, 1])
            .unwrap();
        server
    }

    #[test]
    fn window_eviction_keeps_the_count_honest() {
        let server = server_with_documents();
        let mut queue = RequestQueue::new(&server);

        for _ in 0..1439 {
            queue.add_find_request("empty request").unwrap();
        }
        assert_eq!(queue.no_result_requests(), 1439);

        // A hit fills the window without evicting anything yet.
        queue.add_find_request("curly dog").unwrap();
        assert_eq!(queue.no_result_requests(), 1439);

        // Each further call evicts one of the old no-result entries.
        queue.add_find_request("big collar").unwrap();
        assert_eq!(queue.no_result_requests(), 1438);
        queue.add_find_request("sparrow").unwrap();
        assert_eq!(queue.no_result_requests(), 1437);
    }

    #[test]
    fn evicted_hits_do_not_change_the_count() {
        let server = server_with_documents();
        let mut queue = RequestQueue::new(&server);

        for _ in 0..REQUEST_WINDOW_SIZE {
            queue.add_find_request("sparrow").unwrap();
        }
        queue.add_find_request("no such word").unwrap();
        assert_eq!(queue.no_result_requests(), 1);
    }

    #[test]
    fn failed_parse_records_nothing() {
        let server = server_with_documents();
        let mut queue = RequestQueue::new(&server);

        assert!(queue.add_find_request("curly --dog").is_err());
        assert_eq!(queue.no_result_requests(), 0);
        queue.add_find_request("no such word").unwrap();
        assert_eq!(queue.no_result_requests(), 1);
    }

    #[test]
    fn status_and_predicate_variants_record_results() {
        let mut server = server_with_documents();
        server
            .add_document(6, "banned dog", DocumentStatus::Banned, &[2])
            .unwrap();
        let mut queue = RequestQueue::new(&server);

        let banned = queue
            .add_find_request_with_status("dog", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(banned.len(), 1);

        let even = queue
            .add_find_request_with_predicate("dog", |id, _, _| id % 2 == 0)
            .unwrap();
        assert!(even.iter().all(|doc| doc.id % 2 == 0));
        assert_eq!(queue.no_result_requests(), 0);
    }
}
