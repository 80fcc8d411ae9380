mod tests_comments;
mod tests_walk;
