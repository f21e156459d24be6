use std::collections::{HashMap, VecDeque};

use super::types::ConnectionId;

/// Per-topic FIFO queues of connections waiting for an opponent.
///
/// A connection sits in at most one queue at a time: joining a second topic
/// moves the entry instead of duplicating it. Emptied queues are dropped so
/// the map only holds topics with someone actually waiting.
#[derive(Debug, Default)]
pub struct WaitingPools {
    queues: HashMap<String, VecDeque<ConnectionId>>,
}

impl WaitingPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `conn_id` to the back of the queue for `topic`.
    ///
    /// Returns `false` if the connection was already waiting on that very
    /// topic, in which case the queue is left untouched.
    pub fn enqueue(&mut self, topic: &str, conn_id: ConnectionId) -> bool {
        if self
            .queues
            .get(topic)
            .is_some_and(|queue| queue.contains(&conn_id))
        {
            return false;
        }
        self.leave(&conn_id);
        self.queues
            .entry(topic.to_string())
            .or_default()
            .push_back(conn_id);
        true
    }

    pub fn len(&self, topic: &str) -> usize {
        self.queues.get(topic).map_or(0, VecDeque::len)
    }

    /// Removes and returns the two oldest entries for `topic`, if present.
    pub fn dequeue_pair(&mut self, topic: &str) -> Option<(ConnectionId, ConnectionId)> {
        let queue = self.queues.get_mut(topic)?;
        if queue.len() < 2 {
            return None;
        }
        let first = queue.pop_front()?;
        let second = queue.pop_front()?;
        if queue.is_empty() {
            self.queues.remove(topic);
        }
        Some((first, second))
    }

    /// Puts `conn_id` back at the front of the queue, preserving its priority.
    pub fn requeue_front(&mut self, topic: &str, conn_id: ConnectionId) {
        self.queues
            .entry(topic.to_string())
            .or_default()
            .push_front(conn_id);
    }

    /// Removes `conn_id` from whichever queue holds it.
    ///
    /// Returns the topic it was waiting on, if any.
    pub fn leave(&mut self, conn_id: &ConnectionId) -> Option<String> {
        let topic = self
            .queues
            .iter()
            .find(|(_, queue)| queue.contains(conn_id))
            .map(|(topic, _)| topic.clone())?;
        if let Some(queue) = self.queues.get_mut(&topic) {
            queue.retain(|waiting| waiting != conn_id);
            if queue.is_empty() {
                self.queues.remove(&topic);
            }
        }
        Some(topic)
    }
}
