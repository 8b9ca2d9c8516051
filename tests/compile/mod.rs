mod tests_modes;
