use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::console::{Key, Term};
use owo_colors::OwoColorize;
use popcorn_core::StarRating;

/// Map a digit key to a zero-based star index; '0' stands for the tenth star
fn digit_index(c: char) -> Option<usize> {
    match c.to_digit(10)? {
        0 => Some(9),
        d => Some(d as usize - 1),
    }
}

enum Action {
    Step(i32),
    Hover(usize),
    Commit,
    Cancel,
    Ignore,
}

fn action_for(key: &Key) -> Action {
    match key {
        Key::ArrowRight | Key::ArrowUp | Key::Char('l') | Key::Char('+') => Action::Step(1),
        Key::ArrowLeft | Key::ArrowDown | Key::Char('h') | Key::Char('-') => Action::Step(-1),
        Key::Enter | Key::Char(' ') => Action::Commit,
        Key::Escape | Key::Char('q') => Action::Cancel,
        Key::Char(c) => digit_index(*c).map(Action::Hover).unwrap_or(Action::Ignore),
        _ => Action::Ignore,
    }
}

fn draw(term: &Term, rating: &StarRating) -> Result<()> {
    term.clear_line()?;
    term.write_str(&format!(
        "{} {}  {}",
        "Rate:".bold(),
        rating.render(),
        "←/→ or 1-9, Enter to rate, Esc to cancel".bright_black()
    ))?;
    Ok(())
}

/// Drive the rating widget from the keyboard
///
/// Arrow keys and digits move the hover preview, Enter commits whatever is
/// displayed. Returns the committed value, or None when cancelled. Needs a
/// terminal; the session checks for one before starting.
pub fn prompt_star_rating(rating: &mut StarRating) -> Result<Option<u8>> {
    let term = Term::stderr();
    term.hide_cursor()?;
    let result = read_keys(&term, rating);
    term.clear_line()?;
    term.show_cursor()?;
    result
}

fn read_keys(term: &Term, rating: &mut StarRating) -> Result<Option<u8>> {
    if rating.displayed() == 0 {
        rating.hover_step(1);
    }

    loop {
        draw(term, rating)?;
        let key = term.read_key()?;
        match action_for(&key) {
            Action::Step(delta) => {
                rating.hover_step(delta);
            }
            Action::Hover(index) => {
                if let Err(e) = rating.set_hover(index) {
                    tracing::debug!(index, error = %e, "Ignoring digit outside the rating range");
                }
            }
            Action::Commit => {
                let displayed = rating.displayed();
                if displayed == 0 {
                    continue;
                }
                let committed = rating.commit(usize::from(displayed) - 1).map_err(|e| eyre!("{}", e))?;
                rating.clear_hover();
                return Ok(Some(committed));
            }
            Action::Cancel => {
                rating.clear_hover();
                return Ok(None);
            }
            Action::Ignore => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_index_maps_zero_to_tenth_star() {
        assert_eq!(digit_index('1'), Some(0));
        assert_eq!(digit_index('9'), Some(8));
        assert_eq!(digit_index('0'), Some(9));
        assert_eq!(digit_index('x'), None);
    }

    #[test]
    fn test_arrow_keys_step_hover() {
        assert!(matches!(action_for(&Key::ArrowRight), Action::Step(1)));
        assert!(matches!(action_for(&Key::ArrowLeft), Action::Step(-1)));
        assert!(matches!(action_for(&Key::Enter), Action::Commit));
        assert!(matches!(action_for(&Key::Escape), Action::Cancel));
        assert!(matches!(action_for(&Key::Char('7')), Action::Hover(6)));
        assert!(matches!(action_for(&Key::Tab), Action::Ignore));
    }
}
