//! The closed set of known template ids.
//!
//! Template ids form an open numeric space on the wire: newer producers may
//! emit ids this crate has never heard of. [`TemplateId::from_u16`] therefore
//! returns an `Option` rather than an error; the unknown arm is a first-class
//! branch for callers, not a decode failure.

/// Record kind selector carried in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TemplateId {
    /// Application message routed through a client session.
    SessionMessage = 1,
    /// Expired cluster timer.
    TimerEvent = 2,
    /// Client session accepted into the cluster.
    SessionOpen = 3,
    /// Client session left the cluster.
    SessionClose = 4,
    /// Cluster lifecycle action request.
    ServiceAction = 5,
}

impl TemplateId {
    /// Every id this crate knows, in wire-value order.
    pub const ALL: [Self; 5] = [
        Self::SessionMessage,
        Self::TimerEvent,
        Self::SessionOpen,
        Self::SessionClose,
        Self::ServiceAction,
    ];

    /// Map a wire value onto the known set; `None` is the unknown case.
    pub fn from_u16(raw: u16) -> Option<Self> {
        match raw {
            1 => Some(Self::SessionMessage),
            2 => Some(Self::TimerEvent),
            3 => Some(Self::SessionOpen),
            4 => Some(Self::SessionClose),
            5 => Some(Self::ServiceAction),
            _ => None,
        }
    }

    /// The id's wire value.
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip() {
        for id in TemplateId::ALL {
            assert_eq!(TemplateId::from_u16(id.as_u16()), Some(id));
        }
    }

    #[test]
    fn unknown_values_map_to_none() {
        assert_eq!(TemplateId::from_u16(0), None);
        assert_eq!(TemplateId::from_u16(6), None);
        assert_eq!(TemplateId::from_u16(u16::MAX), None);
    }
}
