use num_bigint::BigUint;

use crate::Address;

/// One validator entry of a committee snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommitteeMember {
    pub address: Address,
    pub voting_power: BigUint,
}

impl CommitteeMember {
    pub fn new(address: Address, voting_power: impl Into<BigUint>) -> Self {
        Self {
            address,
            voting_power: voting_power.into(),
        }
    }
}

/// Ordered validator set attached to a BFT header.
///
/// The order is whatever the caller built; it is encoded as given and never
/// re-sorted, so two committees with the same members in a different order
/// are different committees.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Committee {
    members: Vec<CommitteeMember>,
}

impl Committee {
    pub fn new(members: Vec<CommitteeMember>) -> Self {
        Self { members }
    }

    pub fn push(&mut self, member: CommitteeMember) {
        self.members.push(member);
    }

    pub fn members(&self) -> &[CommitteeMember] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommitteeMember> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_members(self) -> Vec<CommitteeMember> {
        self.members
    }
}

impl From<Vec<CommitteeMember>> for Committee {
    fn from(members: Vec<CommitteeMember>) -> Self {
        Self::new(members)
    }
}

impl FromIterator<CommitteeMember> for Committee {
    fn from_iter<I: IntoIterator<Item = CommitteeMember>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Committee {
    type Item = &'a CommitteeMember;
    type IntoIter = std::slice::Iter<'a, CommitteeMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
