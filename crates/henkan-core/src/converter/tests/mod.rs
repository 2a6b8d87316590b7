mod clause;
