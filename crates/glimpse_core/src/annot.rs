use std::collections::BTreeMap;

use crate::detect::FaceBox;
use crate::rect::RectPx;

/// Where an annotation came from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AnnotationOrigin {
    /// Drawn by hand on the annotation canvas.
    Manual,
    /// Produced by a detector run.
    Detected { confidence: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Annotation {
    pub rect: RectPx,
    pub origin: AnnotationOrigin,
}

impl Annotation {
    pub fn manual(rect: RectPx) -> Self {
        Self {
            rect,
            origin: AnnotationOrigin::Manual,
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.origin, AnnotationOrigin::Manual)
    }
}

impl From<FaceBox> for Annotation {
    fn from(face: FaceBox) -> Self {
        Self {
            rect: face.rect,
            origin: AnnotationOrigin::Detected {
                confidence: face.confidence,
            },
        }
    }
}

/// Rectangles per frame index, in insertion order.
///
/// Insertion order is the only ordering; duplicates are allowed. Detector
/// results for a frame are replaced wholesale by [`Self::set_detected`], so
/// re-running detection never accumulates stale boxes, while hand-drawn
/// annotations are never touched by the detector.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AnnotationStore {
    frames: BTreeMap<usize, Vec<Annotation>>,
}

impl AnnotationStore {
    pub fn push(&mut self, frame: usize, annotation: Annotation) {
        self.frames.entry(frame).or_default().push(annotation);
    }

    pub fn push_manual(&mut self, frame: usize, rect: RectPx) {
        self.push(frame, Annotation::manual(rect));
    }

    /// Remove and return the most recently added annotation for a frame.
    pub fn undo(&mut self, frame: usize) -> Option<Annotation> {
        let list = self.frames.get_mut(&frame)?;
        let removed = list.pop();
        if list.is_empty() {
            self.frames.remove(&frame);
        }
        removed
    }

    pub fn clear_frame(&mut self, frame: usize) {
        self.frames.remove(&frame);
    }

    pub fn clear_all(&mut self) {
        self.frames.clear();
    }

    /// Drop the detected annotations of a frame, keeping manual ones in
    /// their relative order.
    pub fn clear_detected(&mut self, frame: usize) {
        if let Some(list) = self.frames.get_mut(&frame) {
            list.retain(Annotation::is_manual);
            if list.is_empty() {
                self.frames.remove(&frame);
            }
        }
    }

    /// Replace the detected annotations of a frame with a fresh batch,
    /// appended in detector output order.
    pub fn set_detected(&mut self, frame: usize, faces: &[FaceBox]) {
        self.clear_detected(frame);
        for face in faces {
            self.push(frame, Annotation::from(*face));
        }
    }

    /// All annotations for a frame, oldest first. Empty if none.
    pub fn frame(&self, frame: usize) -> &[Annotation] {
        self.frames.get(&frame).map_or(&[], Vec::as_slice)
    }

    /// `(manual, detected)` counts for one frame.
    pub fn counts(&self, frame: usize) -> (usize, usize) {
        let manual = self.frame(frame).iter().filter(|a| a.is_manual()).count();
        (manual, self.frame(frame).len() - manual)
    }

    /// Frame indices that carry at least one annotation, ascending.
    pub fn annotated_frames(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames.keys().copied()
    }

    pub fn total(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32) -> RectPx {
        RectPx::new(x, 0.0, 10.0, 10.0)
    }

    fn face(x: f32, confidence: f32) -> FaceBox {
        FaceBox {
            rect: rect(x),
            confidence,
        }
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut store = AnnotationStore::default();
        store.push_manual(3, rect(1.0));
        store.push_manual(3, rect(2.0));
        store.push_manual(3, rect(0.0));
        let xs: Vec<f32> = store.frame(3).iter().map(|a| a.rect.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut store = AnnotationStore::default();
        store.push_manual(0, rect(5.0));
        store.push_manual(0, rect(5.0));
        assert_eq!(store.frame(0).len(), 2);
    }

    #[test]
    fn undo_removes_only_the_latest() {
        let mut store = AnnotationStore::default();
        store.push_manual(0, rect(1.0));
        store.push_manual(0, rect(2.0));
        let removed = store.undo(0);
        assert_eq!(removed, Some(Annotation::manual(rect(2.0))));
        assert_eq!(store.frame(0), &[Annotation::manual(rect(1.0))]);
    }

    #[test]
    fn undo_on_empty_frame_is_none() {
        let mut store = AnnotationStore::default();
        assert_eq!(store.undo(7), None);
    }

    #[test]
    fn undo_to_empty_drops_the_frame_entry() {
        let mut store = AnnotationStore::default();
        store.push_manual(1, rect(1.0));
        store.undo(1);
        assert!(store.is_empty());
        assert_eq!(store.annotated_frames().count(), 0);
    }

    #[test]
    fn set_detected_replaces_previous_batch() {
        let mut store = AnnotationStore::default();
        store.set_detected(2, &[face(1.0, 0.9), face(2.0, 0.8)]);
        store.set_detected(2, &[face(3.0, 0.7)]);
        let frame = store.frame(2);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].rect.x, 3.0);
    }

    #[test]
    fn set_detected_keeps_manual_in_order() {
        let mut store = AnnotationStore::default();
        store.push_manual(0, rect(1.0));
        store.set_detected(0, &[face(9.0, 0.9)]);
        store.push_manual(0, rect(2.0));
        store.set_detected(0, &[face(8.0, 0.8)]);

        let frame = store.frame(0);
        assert_eq!(frame.len(), 3);
        assert!(frame[0].is_manual() && frame[0].rect.x == 1.0);
        assert!(frame[1].is_manual() && frame[1].rect.x == 2.0);
        assert_eq!(
            frame[2].origin,
            AnnotationOrigin::Detected { confidence: 0.8 }
        );
    }

    #[test]
    fn clear_detected_leaves_manual() {
        let mut store = AnnotationStore::default();
        store.push_manual(0, rect(1.0));
        store.set_detected(0, &[face(9.0, 0.9)]);
        store.clear_detected(0);
        assert_eq!(store.counts(0), (1, 0));
    }

    #[test]
    fn counts_split_by_origin() {
        let mut store = AnnotationStore::default();
        store.push_manual(4, rect(1.0));
        store.set_detected(4, &[face(2.0, 0.9), face(3.0, 0.8)]);
        assert_eq!(store.counts(4), (1, 2));
        assert_eq!(store.total(), 3);
    }

    #[test]
    fn frames_are_independent() {
        let mut store = AnnotationStore::default();
        store.push_manual(0, rect(1.0));
        store.push_manual(9, rect(2.0));
        store.clear_frame(0);
        assert!(store.frame(0).is_empty());
        assert_eq!(store.frame(9).len(), 1);
        assert_eq!(store.annotated_frames().collect::<Vec<_>>(), vec![9]);
    }
}
