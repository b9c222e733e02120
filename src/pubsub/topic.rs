use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;
use super::Message;

struct Inbox<T>{
    queue: VecDeque<(T, u64)>,
    latest: Option<(T, u64)>,
}

//bounded queue of epoch-stamped messages, oldest dropped when full
pub struct Topic<T: Message>{
    name: String,
    capacity: usize,
    inbox: Mutex<Inbox<T>>,
    epoch: AtomicU64,
    dropped: AtomicU64,
}

impl<T: Message> Topic<T>{
    pub fn new(name: &str, capacity: usize) -> Self{
        Topic{
            name: name.to_string(),
            capacity: capacity.max(1),
            inbox: Mutex::new(Inbox{
                queue: VecDeque::with_capacity(capacity.max(1)),
                latest: None,
            }),
            epoch: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inbox<T>>{
        //messages are plain values, a panicked holder cannot leave them half-written
        self.inbox.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> &str{
        &self.name
    }

    //returns the epoch stamped on the message, starting at 1
    pub fn publish(&self, msg: T) -> u64{
        let mut inbox = self.lock();
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        if inbox.queue.len() == self.capacity{
            inbox.queue.pop_front();
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            if dropped.is_power_of_two(){
                warn!(topic = %self.name, dropped, "topic full, dropping oldest messages");
            }
        }
        inbox.queue.push_back((msg.clone(), epoch));
        inbox.latest = Some((msg, epoch));
        epoch
    }

    pub fn try_receive(&self) -> Option<(T, u64)>{
        self.lock().queue.pop_front()
    }

    //latest published message, even if already received
    pub fn peek_latest(&self) -> Option<(T, u64)>{
        self.lock().latest.clone()
    }

    pub fn latest_epoch(&self) -> u64{
        self.epoch.load(Ordering::SeqCst)
    }

    pub fn dropped(&self) -> u64{
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize{
        self.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool{
        self.lock().queue.is_empty()
    }

    pub fn capacity(&self) -> usize{
        self.capacity
    }
}

pub struct Publisher<T: Message>{
    topic: Arc<Topic<T>>,
}

impl<T: Message> Publisher<T>{
    pub fn new(topic: Arc<Topic<T>>) -> Self{
        Publisher{ topic }
    }

    pub fn publish(&self, msg: T) -> u64{
        self.topic.publish(msg)
    }

    pub fn topic_name(&self) -> &str{
        self.topic.name()
    }
}

impl<T: Message> Clone for Publisher<T>{
    fn clone(&self) -> Self{
        Publisher{ topic: Arc::clone(&self.topic) }
    }
}

pub struct Subscriber<T: Message>{
    topic: Arc<Topic<T>>,
    last_seen_epoch: AtomicU64,
}

impl<T: Message> Subscriber<T>{
    pub fn new(topic: Arc<Topic<T>>) -> Self{
        Subscriber{
            topic,
            last_seen_epoch: AtomicU64::new(0),
        }
    }

    pub fn try_recv(&self) -> Option<T>{
        let (msg, epoch) = self.topic.try_receive()?;
        self.last_seen_epoch.fetch_max(epoch, Ordering::SeqCst);
        Some(msg)
    }

    pub fn peek_latest(&self) -> Option<(T, u64)>{
        self.topic.peek_latest()
    }

    pub fn has_new(&self) -> bool{
        self.topic.latest_epoch() > self.last_seen_epoch.load(Ordering::SeqCst)
    }

    pub fn mark_seen(&self){
        self.last_seen_epoch.store(self.topic.latest_epoch(), Ordering::SeqCst);
    }

    pub fn topic_name(&self) -> &str{
        self.topic.name()
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::wrench::{ThrustVector, Wrench};

    #[test]
    fn test_publish_receive_in_order(){
        let topic: Topic<Wrench> = Topic::new("input_forces", 8);
        let a = Wrench::from_array([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let b = Wrench::from_array([0.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(topic.publish(a), 1);
        assert_eq!(topic.publish(b), 2);
        assert_eq!(topic.len(), 2);
        assert_eq!(topic.try_receive(), Some((a, 1)));
        assert_eq!(topic.try_receive(), Some((b, 2)));
        assert!(topic.try_receive().is_none());
        assert!(topic.is_empty());
    }

    #[test]
    fn test_full_topic_drops_oldest(){
        let topic: Topic<u32> = Topic::new("signals", 2);
        topic.publish(10);
        topic.publish(20);
        topic.publish(30);
        assert_eq!(topic.dropped(), 1);
        assert_eq!(topic.try_receive(), Some((20, 2)));
        assert_eq!(topic.try_receive(), Some((30, 3)));
    }

    #[test]
    fn test_peek_latest_survives_receive(){
        let topic: Topic<ThrustVector> = Topic::new("output_forces", 4);
        let thrust = ThrustVector::from_slice(&[1.0, -1.0]);
        topic.publish(thrust);
        topic.try_receive();
        assert_eq!(topic.peek_latest(), Some((thrust, 1)));
        assert_eq!(topic.latest_epoch(), 1);
    }

    #[test]
    fn test_subscriber_has_new(){
        let topic = Arc::new(Topic::<u32>::new("signals", 8));
        let publisher = Publisher::new(Arc::clone(&topic));
        let subscriber = Subscriber::new(Arc::clone(&topic));
        assert!(!subscriber.has_new());

        publisher.publish(0xAA00_0000);
        assert!(subscriber.has_new());
        assert_eq!(subscriber.try_recv(), Some(0xAA00_0000));
        assert!(!subscriber.has_new());

        publisher.publish(1);
        publisher.publish(2);
        subscriber.mark_seen();
        assert!(!subscriber.has_new());
        assert_eq!(subscriber.topic_name(), "signals");
        assert_eq!(publisher.topic_name(), "signals");
    }
}
