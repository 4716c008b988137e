mod test_viewers_join_room;
