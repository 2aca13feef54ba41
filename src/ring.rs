//! The synchronization workers use to share one output file.  Every
//! worker waits at a barrier until the leader's header is on disk, then
//! they take turns writing in rank order: each worker waits for a token
//! from its predecessor, writes, and passes the token on.
//!
//! Nothing here knows about files.  A worker that drops out of the ring
//! early, for whatever reason, releases the barrier and disconnects its
//! successor's token channel, so the failure travels down the ring
//! rather than leaving the rest of the group blocked forever.

use crossbeam::channel::{bounded, Receiver, Sender};
use crossbeam::sync::WaitGroup;
use errors::{Error, Result};

/// The zero-sized permission slip passed from one worker to the next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token;

/// One worker's view of the ring: its position, its share of the
/// barrier, and the two ends of the token channels next to it.
#[derive(Debug)]
pub struct RingMember {
    rank: usize,
    size: usize,
    barrier: Option<WaitGroup>,
    token_in: Option<Receiver<Token>>,
    token_out: Option<Sender<Token>>,
}

/// Builds a ring of `size` members, returned in rank order.  Member 0
/// has no predecessor and holds the token from the start; the last
/// member has no successor.
pub fn ring(size: usize) -> Vec<RingMember> {
    let barrier = WaitGroup::new();
    let mut members: Vec<RingMember> = (0..size)
        .map(|rank| RingMember {
            rank,
            size,
            barrier: Some(barrier.clone()),
            token_in: None,
            token_out: None,
        })
        .collect();
    for rank in 1..size {
        let (tx, rx) = bounded(1);
        members[rank - 1].token_out = Some(tx);
        members[rank].token_in = Some(rx);
    }
    members
}

impl RingMember {
    /// Position in the ring.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of members in the ring.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The leader creates the shared file and goes first.
    pub fn is_leader(&self) -> bool {
        self.rank == 0
    }

    /// Blocks until every member has reached the barrier or left the
    /// ring.  Only the first call waits.
    pub fn barrier(&mut self) {
        if let Some(barrier) = self.barrier.take() {
            barrier.wait();
        }
    }

    /// Blocks until the predecessor hands over the token.  The leader
    /// returns at once.  Fails if the predecessor left without passing
    /// it on.
    pub fn acquire(&mut self) -> Result<()> {
        match self.token_in.take() {
            None => Ok(()),
            Some(token_in) => match token_in.recv() {
                Ok(Token) => Ok(()),
                Err(_) => Err(Error::GroupAborted {
                    rank: self.rank,
                    upstream: self.rank - 1,
                }),
            },
        }
    }

    /// Hands the token to the successor, if there is one.
    pub fn release(&mut self) {
        if let Some(token_out) = self.token_out.take() {
            if token_out.send(Token).is_err() {
                warn!(
                    "[Process {}] Process {} left the ring before its turn",
                    self.rank,
                    self.rank + 1
                );
            }
        }
    }

    /// Runs `turn` while holding the token: acquire, run, release.  The
    /// token is only passed on if `turn` succeeds.
    pub fn take_turn<T, F>(&mut self, turn: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.acquire()?;
        let out = turn()?;
        self.release();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam;
    use std::sync::Mutex;

    #[test]
    fn ring_links_neighbours() {
        let members = ring(3);
        assert_eq!(members.len(), 3);
        assert!(members[0].is_leader());
        assert!(members[0].token_in.is_none());
        assert!(members[0].token_out.is_some());
        assert!(members[1].token_in.is_some());
        assert!(members[2].token_out.is_none());
        assert!(members.iter().all(|m| m.size() == 3));
    }

    #[test]
    fn single_member_never_blocks() {
        let mut members = ring(1);
        let mut member = members.remove(0);
        member.barrier();
        assert_eq!(member.take_turn(|| Ok(7)).unwrap(), 7);
    }

    #[test]
    fn ranks_write_strictly_in_sequence() {
        let log = Mutex::new(vec![]);
        let members = ring(5);
        crossbeam::scope(|spawner| {
            // Spawned in reverse so scheduling alone cannot explain the order.
            for mut member in members.into_iter().rev() {
                let log = &log;
                spawner.spawn(move |_| {
                    member.barrier();
                    let rank = member.rank();
                    member.take_turn(|| {
                        log.lock().unwrap().push(rank);
                        Ok(())
                    })
                });
            }
        })
        .unwrap();
        assert_eq!(log.into_inner().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn failed_turn_aborts_everyone_downstream() {
        let members = ring(4);
        let results = crossbeam::scope(|spawner| {
            let handles: Vec<_> = members
                .into_iter()
                .map(|mut member| {
                    spawner.spawn(move |_| {
                        member.barrier();
                        let rank = member.rank();
                        member.take_turn(|| {
                            if rank == 1 {
                                Err(Error::InvalidArgument("boom".to_string()))
                            } else {
                                Ok(rank)
                            }
                        })
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        })
        .unwrap();

        assert_eq!(results[0].as_ref().unwrap(), &0);
        match results[1] {
            Err(Error::InvalidArgument(_)) => (),
            ref other => panic!("unexpected {:?}", other),
        }
        for (rank, result) in results.iter().enumerate().skip(2) {
            match *result {
                Err(Error::GroupAborted { rank: r, upstream }) => {
                    assert_eq!(r, rank);
                    assert_eq!(upstream, rank - 1);
                }
                ref other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn dropped_member_releases_the_barrier() {
        let mut members = ring(3);
        let dropped = members.remove(2);
        drop(dropped);
        crossbeam::scope(|spawner| {
            for mut member in members {
                spawner.spawn(move |_| {
                    member.barrier();
                    member.take_turn(|| Ok(()))
                });
            }
        })
        .unwrap();
    }
}
