use std::sync::{Arc, RwLock, PoisonError};
use std::collections::HashMap;
use std::any::Any;
use super::topic::Topic;
use super::Message;
use crate::error::{Error, Result};

pub struct TopicRegistry{
    topics: RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl TopicRegistry{
    pub fn new() -> Self{
        TopicRegistry{
            topics: RwLock::new(HashMap::new()),
        }
    }

    //same name must always carry the same message type
    pub fn get_or_create<T: Message>(&self, name: &str, capacity: usize) -> Result<Arc<Topic<T>>>{
        let mut topics = self.topics.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = topics.get(name){
            return Arc::clone(existing)
                .downcast::<Topic<T>>()
                .map_err(|_| Error::TopicTypeMismatch(name.to_string()));
        }
        let topic = Arc::new(Topic::<T>::new(name, capacity));
        topics.insert(name.to_string(), topic.clone() as Arc<dyn Any + Send + Sync>);
        Ok(topic)
    }

    pub fn topic_count(&self) -> usize{
        self.topics.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for TopicRegistry{
    fn default() -> Self{
        Self::new()
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::wrench::Wrench;

    #[test]
    fn test_registry_same_topic_returns_same(){
        let registry = TopicRegistry::new();
        let topic1: Arc<Topic<Wrench>> = registry.get_or_create("input_forces", 8).unwrap();
        topic1.publish(Wrench::from_array([0.0, 0.0, 5.0, 0.0, 0.0, 0.0]));
        let topic2: Arc<Topic<Wrench>> = registry.get_or_create("input_forces", 8).unwrap();
        let (wrench, epoch) = topic2.try_receive().unwrap();
        assert_eq!(wrench.force[2], 5.0);
        assert_eq!(epoch, 1);
        assert_eq!(registry.topic_count(), 1);
    }

    #[test]
    fn test_registry_type_mismatch(){
        let registry = TopicRegistry::new();
        let _signals: Arc<Topic<u32>> = registry.get_or_create("signals", 8).unwrap();
        let wrong = registry.get_or_create::<Wrench>("signals", 8);
        assert!(matches!(wrong, Err(Error::TopicTypeMismatch(name)) if name == "signals"));
        assert_eq!(registry.topic_count(), 1);
    }
}
