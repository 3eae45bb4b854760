/// Step through a fixed option list the way a dropdown does with arrow keys.
///
/// `None` is the unselected placeholder. When `allow_none` is set the
/// placeholder is part of the cycle (optional fields); otherwise stepping
/// from the placeholder lands on the first or last option and never
/// returns to it.
pub fn cycle_option<T: Copy + PartialEq>(
    options: &[T],
    current: Option<T>,
    forward: bool,
    allow_none: bool,
) -> Option<T> {
    if options.is_empty() {
        return None;
    }

    let last = options.len() - 1;
    let position = current.and_then(|value| options.iter().position(|o| *o == value));

    let next = match (position, forward) {
        (None, true) => Some(0),
        (None, false) => Some(last),
        (Some(i), true) if i == last => {
            if allow_none {
                None
            } else {
                Some(0)
            }
        }
        (Some(i), true) => Some(i + 1),
        (Some(0), false) => {
            if allow_none {
                None
            } else {
                Some(last)
            }
        }
        (Some(i), false) => Some(i - 1),
    };

    next.map(|i| options[i])
}
