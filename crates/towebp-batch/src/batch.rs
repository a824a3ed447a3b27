//! Ordered selection list plus per-file conversion results.

use std::collections::HashMap;

use crate::types::{ConversionFailure, ConversionStatus, FileId, NewFile, SelectedFile, Ticket};

/// Result store entry for one file.
#[derive(Debug)]
struct Entry<R> {
    /// Incremented by every [`Batch::begin`] for the file.
    generation: u64,
    status: ConversionStatus<R>,
}

/// The files a user has selected and what became of converting them.
///
/// Files keep their insertion order. Each file gets a [`FileId`] that
/// keys its conversion status, so positional removal compacts the list
/// without disturbing the results of other files.
///
/// Every path that replaces or discards a converted reference drops it
/// right away: re-conversion, removal, a stale completion, and
/// [`clear`](Self::clear). Reference types that own a resource release
/// it in their `Drop` impl.
#[derive(Debug)]
pub struct Batch<R> {
    next_id: u64,
    files: Vec<SelectedFile>,
    entries: HashMap<FileId, Entry<R>>,
}

impl<R> Default for Batch<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Batch<R> {
    /// Create an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            files: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Append files to the end of the list, preserving their order.
    ///
    /// Duplicates are kept as separate entries. Returns the identifiers
    /// minted for the new files, in the same order.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = NewFile>) -> Vec<FileId> {
        files
            .into_iter()
            .map(|file| {
                let id = FileId::new(self.next_id);
                self.next_id += 1;
                self.files.push(SelectedFile {
                    id,
                    name: file.name,
                    mime: file.mime,
                    bytes: file.bytes.into(),
                });
                id
            })
            .collect()
    }

    /// Remove the file at `position`, shifting later files down by one.
    ///
    /// The file's conversion status is discarded with it. Returns `None`
    /// if `position` is out of range.
    pub fn remove_file(&mut self, position: usize) -> Option<SelectedFile> {
        if position >= self.files.len() {
            return None;
        }
        let file = self.files.remove(position);
        self.entries.remove(&file.id);
        Some(file)
    }

    /// Remove the file with the given identifier.
    pub fn remove(&mut self, id: FileId) -> Option<SelectedFile> {
        let position = self.position(id)?;
        self.remove_file(position)
    }

    /// Drop every file and result. Identifiers are not reused afterwards.
    pub fn clear(&mut self) {
        self.files.clear();
        self.entries.clear();
    }

    /// All selected files in display order.
    #[must_use]
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// Look up a file by identifier.
    #[must_use]
    pub fn file(&self, id: FileId) -> Option<&SelectedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Current display position of a file.
    #[must_use]
    pub fn position(&self, id: FileId) -> Option<usize> {
        self.files.iter().position(|f| f.id == id)
    }

    /// Number of selected files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no files are selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Start converting a file.
    ///
    /// Marks the file [`Pending`](ConversionStatus::Pending), dropping any
    /// earlier result, and returns a ticket for [`complete`](Self::complete).
    /// Returns `None` if no such file is selected.
    pub fn begin(&mut self, id: FileId) -> Option<Ticket> {
        if self.position(id).is_none() {
            return None;
        }
        let entry = self.entries.entry(id).or_insert(Entry {
            generation: 0,
            status: ConversionStatus::Pending,
        });
        entry.generation += 1;
        entry.status = ConversionStatus::Pending;
        Some(Ticket {
            id,
            generation: entry.generation,
        })
    }

    /// Start converting every selected file, in display order.
    pub fn begin_all(&mut self) -> Vec<Ticket> {
        let ids: Vec<FileId> = self.files.iter().map(|f| f.id).collect();
        ids.into_iter().filter_map(|id| self.begin(id)).collect()
    }

    /// Record the outcome of a conversion.
    ///
    /// The outcome is stored only if the file is still selected and the
    /// ticket belongs to its latest run. Otherwise it is dropped and
    /// `false` is returned.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<R, ConversionFailure>) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.id) else {
            return false;
        };
        if entry.generation != ticket.generation {
            return false;
        }
        entry.status = match outcome {
            Ok(reference) => ConversionStatus::Succeeded(reference),
            Err(failure) => ConversionStatus::Failed(failure),
        };
        true
    }

    /// Conversion status of a file, or `None` if it was never converted.
    #[must_use]
    pub fn status(&self, id: FileId) -> Option<&ConversionStatus<R>> {
        self.entries.get(&id).map(|e| &e.status)
    }

    /// Conversion status of the file currently at `position`.
    #[must_use]
    pub fn status_at(&self, position: usize) -> Option<&ConversionStatus<R>> {
        let file = self.files.get(position)?;
        self.status(file.id)
    }

    /// Successfully converted files with their references, in display order.
    pub fn converted(&self) -> impl Iterator<Item = (&SelectedFile, &R)> {
        self.files.iter().filter_map(|file| {
            self.status(file.id)
                .and_then(ConversionStatus::succeeded)
                .map(|r| (file, r))
        })
    }

    /// Failed files with their failures, in display order.
    pub fn failed(&self) -> impl Iterator<Item = (&SelectedFile, &ConversionFailure)> {
        self.files.iter().filter_map(|file| {
            self.status(file.id)
                .and_then(ConversionStatus::failure)
                .map(|f| (file, f))
        })
    }

    /// Number of successfully converted files.
    #[must_use]
    pub fn converted_count(&self) -> usize {
        self.converted().count()
    }

    /// Number of failed conversions.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    /// Number of conversions in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.status.is_pending())
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn file(name: &str) -> NewFile {
        NewFile::new(name, name.as_bytes().to_vec())
    }

    fn names<R>(batch: &Batch<R>) -> Vec<&str> {
        batch.files().iter().map(|f| f.name.as_str()).collect()
    }

    /// A reference that records its release when dropped.
    struct Tracked {
        label: &'static str,
        released: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.released.borrow_mut().push(self.label);
        }
    }

    fn tracked(label: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Tracked {
        Tracked {
            label,
            released: Rc::clone(log),
        }
    }

    // --- File selector ---

    #[test]
    fn add_preserves_order_and_duplicates() {
        let mut batch: Batch<()> = Batch::new();
        batch.add_files([file("a.png"), file("b.jpg")]);
        batch.add_files([file("a.png")]);
        assert_eq!(names(&batch), ["a.png", "b.jpg", "a.png"]);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let mut batch: Batch<()> = Batch::new();
        let first = batch.add_files([file("a.png"), file("b.png")]);
        batch.remove_file(1);
        batch.clear();
        let second = batch.add_files([file("c.png")]);
        assert!(first.iter().all(|id| !second.contains(id)));
        assert!(second[0] > first[1]);
    }

    #[test]
    fn remove_compacts_list() {
        let mut batch: Batch<()> = Batch::new();
        batch.add_files([file("a"), file("b"), file("c"), file("d")]);
        let removed = batch.remove_file(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&batch), ["a", "c", "d"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut batch: Batch<()> = Batch::new();
        batch.add_files([file("a")]);
        assert!(batch.remove_file(1).is_none());
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn add_remove_sequences_track_insertion_order() {
        // Mirror every operation on a plain Vec and compare.
        let mut batch: Batch<()> = Batch::new();
        let mut model: Vec<String> = Vec::new();
        let mut adds = 0usize;
        let mut removes = 0usize;

        for step in 0..40usize {
            if step % 3 == 2 && !model.is_empty() {
                let pos = (step * 7) % model.len();
                model.remove(pos);
                assert!(batch.remove_file(pos).is_some());
                removes += 1;
            } else {
                let batch_size = step % 3 + 1;
                let new: Vec<String> = (0..batch_size)
                    .map(|i| format!("f{step}-{i}.png"))
                    .collect();
                model.extend(new.iter().cloned());
                batch.add_files(new.iter().map(|n| file(n)));
                adds += batch_size;
            }
            assert_eq!(batch.len(), adds - removes);
            assert_eq!(names(&batch), model);
        }
    }

    #[test]
    fn remove_by_id() {
        let mut batch: Batch<()> = Batch::new();
        let ids = batch.add_files([file("a"), file("b")]);
        assert!(batch.remove(ids[0]).is_some());
        assert!(batch.remove(ids[0]).is_none());
        assert_eq!(names(&batch), ["b"]);
    }

    #[test]
    fn empty_batch_has_nothing_to_show() {
        let batch: Batch<()> = Batch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.converted_count(), 0);
        assert!(batch.status_at(0).is_none());
    }

    // --- Result store ---

    #[test]
    fn complete_stores_result() {
        let mut batch = Batch::new();
        let ids = batch.add_files([file("a.png")]);
        let ticket = batch.begin(ids[0]).unwrap();
        assert!(batch.status(ids[0]).unwrap().is_pending());
        assert_eq!(batch.pending_count(), 1);

        assert!(batch.complete(ticket, Ok("url-a")));
        assert_eq!(batch.status(ids[0]), Some(&ConversionStatus::Succeeded("url-a")));
        assert_eq!(batch.pending_count(), 0);
    }

    #[test]
    fn never_converted_has_no_status() {
        let mut batch: Batch<()> = Batch::new();
        let ids = batch.add_files([file("a.png")]);
        assert!(batch.status(ids[0]).is_none());
    }

    #[test]
    fn begin_unknown_file_returns_none() {
        let mut batch: Batch<()> = Batch::new();
        assert!(batch.begin(FileId::new(42)).is_none());
    }

    #[test]
    fn failure_is_observable() {
        let mut batch: Batch<()> = Batch::new();
        let ids = batch.add_files([file("bad.png")]);
        let ticket = batch.begin(ids[0]).unwrap();
        batch.complete(ticket, Err(ConversionFailure::new("decode failed")));

        let status = batch.status(ids[0]).unwrap();
        assert_eq!(status.failure().unwrap().reason, "decode failed");
        assert_eq!(batch.failed_count(), 1);
        assert_eq!(batch.converted_count(), 0);
    }

    #[test]
    fn converting_twice_overwrites_and_releases() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut batch = Batch::new();
        let ids = batch.add_files([file("a.png")]);

        let t1 = batch.begin(ids[0]).unwrap();
        batch.complete(t1, Ok(tracked("first", &log)));
        let t2 = batch.begin(ids[0]).unwrap();
        // Starting a new run releases the old reference.
        assert_eq!(*log.borrow(), ["first"]);
        batch.complete(t2, Ok(tracked("second", &log)));

        assert_eq!(batch.converted_count(), 1);
        let (_, current) = batch.converted().next().unwrap();
        assert_eq!(current.label, "second");
        assert_ne!(t1, t2);
    }

    #[test]
    fn stale_completion_is_dropped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut batch = Batch::new();
        let ids = batch.add_files([file("a.png")]);

        let old = batch.begin(ids[0]).unwrap();
        let new = batch.begin(ids[0]).unwrap();
        assert!(batch.complete(new, Ok(tracked("new", &log))));
        // The older run finishes last; its result must not win.
        assert!(!batch.complete(old, Ok(tracked("old", &log))));

        assert_eq!(*log.borrow(), ["old"]);
        assert_eq!(batch.converted().next().unwrap().1.label, "new");
    }

    #[test]
    fn completion_after_removal_is_dropped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut batch = Batch::new();
        let ids = batch.add_files([file("a.png"), file("b.png")]);
        let ticket = batch.begin(ids[0]).unwrap();
        batch.remove_file(0);

        assert!(!batch.complete(ticket, Ok(tracked("orphan", &log))));
        assert_eq!(*log.borrow(), ["orphan"]);
        assert_eq!(batch.converted_count(), 0);
    }

    #[test]
    fn removal_releases_result() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut batch = Batch::new();
        let ids = batch.add_files([file("a.png")]);
        let ticket = batch.begin(ids[0]).unwrap();
        batch.complete(ticket, Ok(tracked("a", &log)));

        batch.remove_file(0);
        assert_eq!(*log.borrow(), ["a"]);
        assert!(batch.status(ids[0]).is_none());
    }

    #[test]
    fn clear_releases_everything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut batch = Batch::new();
        batch.add_files([file("a.png"), file("b.png")]);
        let tickets = batch.begin_all();
        batch.complete(tickets[0], Ok(tracked("a", &log)));
        batch.complete(tickets[1], Ok(tracked("b", &log)));

        batch.clear();
        let mut released = log.borrow().clone();
        released.sort_unstable();
        assert_eq!(released, ["a", "b"]);
        assert!(batch.is_empty());
        assert_eq!(batch.pending_count(), 0);
    }

    #[test]
    fn removing_first_keeps_remaining_results_aligned() {
        // Positional keys would leave position 0 showing the stale
        // result of the removed file. Keys follow the file instead.
        let mut batch = Batch::new();
        batch.add_files([file("zero.png"), file("one.png"), file("two.png")]);
        for ticket in batch.begin_all() {
            let name = batch.file(ticket.id).unwrap().name.clone();
            batch.complete(ticket, Ok(format!("{name}-result")));
        }

        batch.remove_file(0);

        assert_eq!(batch.files()[0].name, "one.png");
        assert_eq!(
            batch.status_at(0).and_then(ConversionStatus::succeeded),
            Some(&"one.png-result".to_owned())
        );
        assert_eq!(
            batch.status_at(1).and_then(ConversionStatus::succeeded),
            Some(&"two.png-result".to_owned())
        );
        assert!(batch.status_at(2).is_none());

        let converted: Vec<(&str, &str)> = batch
            .converted()
            .map(|(f, r)| (f.name.as_str(), r.as_str()))
            .collect();
        assert_eq!(
            converted,
            [("one.png", "one.png-result"), ("two.png", "two.png-result")]
        );
    }

    #[test]
    fn out_of_order_completion() {
        let mut batch = Batch::new();
        batch.add_files([file("a"), file("b"), file("c")]);
        let tickets = batch.begin_all();
        batch.complete(tickets[2], Ok(2));
        batch.complete(tickets[0], Ok(0));
        assert_eq!(batch.pending_count(), 1);
        batch.complete(tickets[1], Ok(1));

        let order: Vec<i32> = batch.converted().map(|(_, r)| *r).collect();
        assert_eq!(order, [0, 1, 2]);
    }
}
