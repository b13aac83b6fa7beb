/*!
 * Job Queue
 * Owned FIFO of jobs with front access for scheduling decisions
 */

use super::types::Job;
use std::collections::VecDeque;
use thiserror::Error;

/// Queue operation result
pub type QueueResult<T> = Result<T, QueueError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Queue '{0}' is empty")]
    Empty(&'static str),
}

/// FIFO of jobs; each job lives in exactly one queue at a time
#[derive(Debug)]
pub struct JobQueue {
    name: &'static str,
    jobs: VecDeque<Job>,
}

impl JobQueue {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            jobs: VecDeque::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Append to the tail
    pub fn enqueue(&mut self, job: Job) {
        self.jobs.push_back(job);
    }

    /// Remove and return the head
    pub fn dequeue_front(&mut self) -> QueueResult<Job> {
        self.jobs.pop_front().ok_or(QueueError::Empty(self.name))
    }

    pub fn peek_front(&self) -> Option<&Job> {
        self.jobs.front()
    }

    pub fn peek_front_mut(&mut self) -> Option<&mut Job> {
        self.jobs.front_mut()
    }

    /// Move the head to the tail, keeping everyone else in order
    pub fn rotate(&mut self) -> QueueResult<()> {
        let job = self.dequeue_front()?;
        self.enqueue(job);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }
}

impl Extend<Job> for JobQueue {
    fn extend<I: IntoIterator<Item = Job>>(&mut self, iter: I) {
        self.jobs.extend(iter)
    }
}
