mod tests_cache;
mod tests_loader;
