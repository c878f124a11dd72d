//! Re-prompting input loops shared by every resolver.

use crate::domain::AppError;
use crate::ports::Prompt;

/// Ask until `accept` holds for the answer.
///
/// There is no retry limit: the loop ends on a valid answer or when the prompt
/// itself fails (for example because input was closed).
pub fn prompt_until<P, F>(
    prompt: &P,
    question: &str,
    rejection: &str,
    accept: F,
) -> Result<String, AppError>
where
    P: Prompt + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let answer = prompt.read_line(question)?;
        if accept(&answer) {
            return Ok(answer);
        }
        tracing::debug!(answer = %answer, "rejected input");
        prompt.say(rejection);
    }
}

/// Parse a 1-based menu choice, returning the 0-based index.
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Show a numbered menu of `items` and return the chosen index.
///
/// Fails with `NoResources` when there is nothing to choose from.
pub fn select_index<P, S>(prompt: &P, items: &[S], resource: &'static str) -> Result<usize, AppError>
where
    P: Prompt + ?Sized,
    S: AsRef<str>,
{
    if items.is_empty() {
        return Err(AppError::NoResources { resource, scope: String::new() });
    }

    let mut menu = format!("\nAvailable {}:", resource);
    for (i, item) in items.iter().enumerate() {
        menu.push_str(&format!("\n{}) {}", i + 1, item.as_ref()));
    }
    prompt.say(&menu);

    let question = format!("Enter number (1-{}) to select {}:", items.len(), resource);
    let rejection = format!("Invalid input. Please enter a number between 1 and {}", items.len());
    let answer = prompt_until(prompt, &question, &rejection, |answer| {
        parse_choice(answer, items.len()).is_some()
    })?;

    parse_choice(&answer, items.len()).ok_or(AppError::Unresolved("menu selection"))
}

/// Show a numbered menu of `items` and return the chosen entry.
pub fn select_from_list<P>(
    prompt: &P,
    items: Vec<String>,
    resource: &'static str,
) -> Result<String, AppError>
where
    P: Prompt + ?Sized,
{
    let index = select_index(prompt, &items, resource)?;
    Ok(items.into_iter().nth(index).unwrap_or_default())
}
