//! Latest-value hand-off of the object model from an editing thread to the render thread.
//!
//! The editor publishes immutable copies, so the receiver only ever sees complete edits.

use super::object::object_collection::ObjectCollection;
use single_value_channel::{Receiver, Updater};
use std::sync::Arc;

pub struct SceneUpdater {
    updater: Updater<Option<Arc<ObjectCollection>>>,
}

pub struct SceneReceiver {
    receiver: Receiver<Option<Arc<ObjectCollection>>>,
}

pub fn scene_channel() -> (SceneUpdater, SceneReceiver) {
    let (receiver, updater) = single_value_channel::channel::<Arc<ObjectCollection>>();
    (SceneUpdater { updater }, SceneReceiver { receiver })
}

impl SceneUpdater {
    /// Replaces the scene the render thread will see next. Returns false if the receiver has
    /// been dropped.
    pub fn publish(&self, collection: ObjectCollection) -> bool {
        self.updater.update(Some(Arc::new(collection))).is_ok()
    }

    pub fn has_no_receiver(&self) -> bool {
        self.updater.has_no_receiver()
    }
}

impl SceneReceiver {
    /// Most recently published scene, `None` until the first publish
    pub fn latest(&mut self) -> Option<Arc<ObjectCollection>> {
        self.receiver.latest().clone()
    }

    pub fn has_no_updater(&self) -> bool {
        self.receiver.has_no_updater()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{object::operation::BoolOperator, primitives::sdf_kind::SdfKind};
    use std::thread;

    #[test]
    fn receiver_sees_latest_publish() {
        let (updater, mut receiver) = scene_channel();
        assert!(receiver.latest().is_none());

        let editor = thread::spawn(move || {
            let mut collection = ObjectCollection::new();
            for _ in 0..3 {
                collection
                    .new_object("sphere", SdfKind::Sphere, BoolOperator::Union)
                    .unwrap();
                assert!(updater.publish(collection.clone()));
            }
        });
        editor.join().unwrap();

        let latest = receiver.latest().unwrap();
        assert_eq!(latest.objects().len(), 3);
        assert!(receiver.has_no_updater());
    }
}
