mod blacklist;
mod temp_exempt;
