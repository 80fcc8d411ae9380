mod tests_render;
mod tests_validity;
