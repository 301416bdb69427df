use super::{group_by_period, period_label, NodeKind, PlayEvent, PlayNode, PlayStrategy};

/// Period-only grouping for sports without a dedicated strategy
pub struct GenericStrategy;

impl PlayStrategy for GenericStrategy {
    fn build_tree(&self, events: &[PlayEvent]) -> PlayNode {
        let mut root = PlayNode::new("Plays", NodeKind::Root);
        for bucket in group_by_period(events) {
            let label = period_label(&bucket, |n| format!("Period {}", n));
            let mut period = PlayNode::new(label, NodeKind::Period { number: bucket.number });
            for &idx in &bucket.indices {
                period.push_event(events[idx].clone());
            }
            root.push_node(period);
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plays::Period;

    #[test]
    fn test_groups_by_period_and_keeps_every_event() {
        let events = vec![
            PlayEvent::new("Goal").in_period(Period::new(2, "", "")).scoring(1, 0),
            PlayEvent::new("Faceoff").in_period(Period::new(1, "", "1st Period")),
            PlayEvent::new("Review"),
        ];
        let tree = GenericStrategy.build_tree(&events);
        let labels: Vec<&str> = tree.child_nodes().map(|n| n.label.as_str()).collect();

        assert_eq!(labels, vec!["1st Period", "Period 2", "Unknown Period"]);
        assert_eq!(tree.event_count(), events.len());
        assert!(tree.child_nodes().nth(1).unwrap().scoring);
    }
}
