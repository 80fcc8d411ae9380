mod tests_strip;
